//! Loader fuzz target: feed arbitrary bytes to the schema loader, then compile
//! whatever loads. Neither step may panic.
//! Build with: cargo fuzz run loader_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(mut protocol) = cdpgen::parse(s) {
        cdpgen::patch::fix_protocol(&mut protocol);
        let report = cdpgen::compile_protocol(&protocol);
        for m in &report.modules {
            let _ = cdpgen::render::render_module(m);
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run loader_fuzz");
}
