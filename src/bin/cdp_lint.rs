//! Lint CDP schema files: unresolved references, undeclared and unused dependencies.
//!
//! Usage:
//!   cdp_lint [OPTIONS] FILE.json ...
//!
//! All files are loaded and merged before linting, so references across the
//! browser and JS documents resolve.
//!
//! Options:
//!   --human, -H  Human-readable output

use anyhow::Context;
use cdpgen::lint::{lint, LintMessage, LintRule, Severity};
use cdpgen::parser::{merge, parse};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cdp_lint", about = "Lint CDP schema files")]
struct Args {
    /// Schema files (browser_protocol.json, js_protocol.json, ...).
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Human-readable output.
    #[arg(long, short = 'H')]
    human: bool,

    /// Default log level; RUST_LOG takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn rule_id(rule: LintRule) -> &'static str {
    match rule {
        LintRule::UnresolvedReference => "unresolved-reference",
        LintRule::UndeclaredDependency => "undeclared-dependency",
        LintRule::UnusedDependency => "unused-dependency",
    }
}

fn print_message(m: &LintMessage, style: OutputStyle) {
    let severity_str = match m.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match style {
        OutputStyle::Compact => {
            println!("{}: {}: {} [{}]", m.domain, severity_str, m.message, rule_id(m.rule));
        }
        OutputStyle::Human => {
            println!("  {} ({}): {}", m.domain, severity_str, m.message);
            println!("    rule: {}", rule_id(m.rule));
        }
    }
}

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();
    let style = if args.human {
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };

    let mut protocols = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        protocols.push(parse(&source).with_context(|| format!("loading {}", path.display()))?);
    }
    let Some(protocol) = merge(protocols) else {
        return Ok(());
    };

    let messages = lint(&protocol);
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for m in &messages {
        match m.severity {
            Severity::Error => total_errors += 1,
            Severity::Warning => total_warnings += 1,
        }
        print_message(m, style);
    }

    if total_errors > 0 || total_warnings > 0 {
        eprintln!("lint: {} error(s), {} warning(s)", total_errors, total_warnings);
    }
    if total_errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
