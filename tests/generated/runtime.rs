// DO NOT EDIT THIS FILE!
//
// This file is generated from the CDP specification. If you need to make
// changes, edit the generator and regenerate all of the modules.
//
// CDP domain: Runtime (experimental)

//! *This CDP domain is experimental.*
#![allow(deprecated)]

use super::util;
use super::foo;

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteValue {
    pub type_: String,
    pub value: Option<serde_json::Value>,
}

impl RemoteValue {
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = util::JsonMap::new();
        json.insert("type".to_owned(), serde_json::Value::from(self.type_.clone()));
        if let Some(v) = &self.value {
            json.insert("value".to_owned(), serde_json::Value::from(v.clone()));
        }
        serde_json::Value::Object(json)
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        let json = util::as_object(json)?;
        Ok(RemoteValue {
            type_: util::decode_string(util::required(json, "type")?)?,
            value: util::optional_any(json, "value").map(util::decode_any).transpose()?,
        })
    }
}

/// # Parameters
/// * `expression`:
///
/// # Returns
/// * `result`:
pub fn evaluate(expression: String) -> util::Command<RemoteValue> {
    let mut params = util::JsonMap::new();
    params.insert("expression".to_owned(), serde_json::Value::from(expression.clone()));
    util::Command::new("Runtime.evaluate", Some(params), |json| Ok(RemoteValue::from_json(util::required(json, "result")?)?))
}

#[deprecated(since = "1.3")]
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleCalled {
    pub args: Vec<RemoteValue>,
    pub kind: Option<foo::Kind>,
}

impl util::Event for ConsoleCalled {
    const METHOD: &'static str = "Runtime.consoleCalled";

    fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        let json = util::event_params(json)?;
        Ok(ConsoleCalled {
            args: util::decode_array(util::required(&json, "args")?, RemoteValue::from_json)?,
            kind: util::optional(&json, "kind").map(foo::Kind::from_json).transpose()?,
        })
    }
}
