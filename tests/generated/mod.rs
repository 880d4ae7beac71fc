// DO NOT EDIT THIS FILE!
//
// This file is generated from the CDP specification. If you need to make
// changes, edit the generator and regenerate all of the modules.

#![allow(deprecated)]

pub mod util;

pub mod foo;
pub mod runtime;

/// Every event of the package, tagged by domain.
#[derive(Debug, Clone, PartialEq)]
pub enum CdpEvent {
    FooBarChanged(foo::BarChanged),
    FooReset(foo::Reset),
    RuntimeConsoleCalled(runtime::ConsoleCalled),
}

/// Decode a notification. `Ok(None)` for a method no module declares.
pub fn parse_event(method: &str, params: &serde_json::Value) -> Result<Option<CdpEvent>, util::CdpError> {
    match method {
        "Foo.barChanged" => <foo::BarChanged as util::Event>::from_json(params).map(|e| Some(CdpEvent::FooBarChanged(e))),
        "Foo.reset" => <foo::Reset as util::Event>::from_json(params).map(|e| Some(CdpEvent::FooReset(e))),
        "Runtime.consoleCalled" => <runtime::ConsoleCalled as util::Event>::from_json(params).map(|e| Some(CdpEvent::RuntimeConsoleCalled(e))),
        _ => Ok(None),
    }
}
