//! Linter for CDP schemas: non-fatal consistency checks.
//!
//! ## Rules
//!
//! - **Unresolved reference**: a `$ref` names a type declared in no loaded domain.
//!   The compiler resolves it as written, so the generated module would not build.
//! - **Undeclared dependency**: a domain refers to another domain that is missing
//!   from its `dependencies` list.
//! - **Unused dependency**: a domain lists a dependency it never refers to.
//!
//! Run the linter via the `cdp_lint` binary: `cdp_lint browser_protocol.json js_protocol.json`.
//! Exit code 1 if any error-level findings.

use crate::ast::{Domain, Protocol};
use crate::resolve::{domain_imports, domain_references, TypeRef};
use std::collections::HashSet;

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    /// A reference must name a declared type.
    UnresolvedReference,
    /// Every referenced domain should be declared as a dependency.
    UndeclaredDependency,
    /// Declared dependencies should be referenced.
    UnusedDependency,
}

/// A single lint message with the domain it belongs to.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub domain: String,
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules on a loaded protocol. Messages are grouped by domain, in domain order.
pub fn lint(protocol: &Protocol) -> Vec<LintMessage> {
    let declared: HashSet<(&str, &str)> = protocol
        .domains
        .iter()
        .flat_map(|d| d.types.iter().map(move |t| (d.name.as_str(), t.id.as_str())))
        .collect();
    let mut out = Vec::new();
    for domain in &protocol.domains {
        lint_references(domain, &declared, &mut out);
        lint_dependencies(domain, &mut out);
    }
    out
}

fn lint_references(domain: &Domain, declared: &HashSet<(&str, &str)>, out: &mut Vec<LintMessage>) {
    let mut reported = HashSet::new();
    for reference in domain_references(domain) {
        let target = TypeRef::parse(reference, &domain.name);
        if declared.contains(&(target.domain.as_str(), target.name.as_str())) {
            continue;
        }
        if reported.insert(target.qualified()) {
            out.push(LintMessage {
                domain: domain.name.clone(),
                rule: LintRule::UnresolvedReference,
                severity: Severity::Error,
                message: format!("reference `{}` names no declared type", reference),
            });
        }
    }
}

fn lint_dependencies(domain: &Domain, out: &mut Vec<LintMessage>) {
    let imports = domain_imports(domain);
    for import in &imports {
        if !domain.dependencies.contains(import) {
            out.push(LintMessage {
                domain: domain.name.clone(),
                rule: LintRule::UndeclaredDependency,
                severity: Severity::Warning,
                message: format!("refers to {} without declaring it as a dependency", import),
            });
        }
    }
    for dep in &domain.dependencies {
        if !imports.contains(dep) {
            out.push(LintMessage {
                domain: domain.name.clone(),
                rule: LintRule::UnusedDependency,
                severity: Severity::Warning,
                message: format!("declares dependency {} but never refers to it", dep),
            });
        }
    }
}
