//! Generate Rust bindings for the Chrome DevTools Protocol.
//!
//! Usage:
//!   cdpgen --browser-protocol browser_protocol.json --js-protocol js_protocol.json --output src/cdp
//!
//! Both documents are loaded, merged and sorted by domain, patched, and compiled
//! one domain at a time. Every domain that compiles is written; the exit code is
//! 1 if any domain failed.

use anyhow::{bail, Context};
use cdpgen::domain::compile_protocol;
use cdpgen::emit::write_package;
use cdpgen::parser::{merge, parse};
use cdpgen::patch::fix_protocol;
use cdpgen::Protocol;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cdpgen", about = "Generate Rust bindings for the Chrome DevTools Protocol")]
struct Args {
    /// browser_protocol.json
    #[arg(long, value_name = "FILE")]
    browser_protocol: PathBuf,

    /// js_protocol.json
    #[arg(long, value_name = "FILE")]
    js_protocol: PathBuf,

    /// Directory for the generated modules (created if missing).
    #[arg(long, short, value_name = "DIR")]
    output: PathBuf,

    /// Compile the schema as published, without the built-in fixes.
    #[arg(long)]
    no_fixes: bool,

    /// Default log level; RUST_LOG takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn load(path: &Path) -> anyhow::Result<Protocol> {
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&source).with_context(|| format!("loading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    let browser = load(&args.browser_protocol)?;
    let js = load(&args.js_protocol)?;
    let Some(mut protocol) = merge(vec![browser, js]) else {
        bail!("no protocol documents loaded");
    };
    info!("Loaded {} domains (protocol {})", protocol.domains.len(), protocol.version);

    if !args.no_fixes {
        let applied = fix_protocol(&mut protocol);
        info!("Applied {} schema fixes", applied);
    }

    let report = compile_protocol(&protocol);
    let written = write_package(&args.output, &report.modules)
        .with_context(|| format!("writing package to {}", args.output.display()))?;
    info!("Wrote {} files to {}", written.len(), args.output.display());

    if !report.is_complete() {
        for f in &report.failures {
            error!("{}: {}", f.domain, f.error);
        }
        eprintln!("cdpgen: {} domain(s) failed to compile", report.failures.len());
        std::process::exit(1);
    }
    Ok(())
}
