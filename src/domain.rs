//! Domain compiler: types, commands and events of one domain plus its computed imports.

use crate::ast::{Domain, Protocol};
use crate::command::{compile_command, CommandBinding};
use crate::decl::{compile_type, Declaration};
use crate::error::CompileError;
use crate::event::{compile_event, EventRecord};
use crate::naming::module_name;
use crate::resolve::{domain_imports, ReferenceGraph};
use crate::shape::FieldPlan;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Read-only state shared by every compiler operation.
///
/// Built once from the patched protocol; domains can be compiled against it in
/// any order or in parallel.
#[derive(Debug, Clone)]
pub struct CompileContext {
    version: String,
    graph: ReferenceGraph,
}

impl CompileContext {
    pub fn new(protocol: &Protocol) -> Self {
        CompileContext {
            version: protocol.version.to_string(),
            graph: ReferenceGraph::build(protocol),
        }
    }

    /// `major.minor` of the compiled protocol.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }
}

/// Everything needed to render one domain's module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePlan {
    pub domain: String,
    pub module: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Domains whose modules this one imports, sorted, never itself.
    pub imports: BTreeSet<String>,
    pub declarations: Vec<Declaration>,
    pub commands: Vec<CommandBinding>,
    pub events: Vec<EventRecord>,
}

impl ModulePlan {
    pub fn has_deprecated(&self) -> bool {
        self.commands.iter().any(|c| c.deprecated_since.is_some())
            || self.events.iter().any(|e| e.deprecated_since.is_some())
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    pub fn command(&self, name: &str) -> Option<&CommandBinding> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.name == name)
    }
}

pub fn compile_domain(domain: &Domain, ctx: &CompileContext) -> Result<ModulePlan, CompileError> {
    debug!("Compiling domain {}", domain.name);
    let declarations = domain
        .types
        .iter()
        .map(|t| compile_type(t, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let commands: Vec<CommandBinding> = domain.commands.iter().map(|c| compile_command(c, ctx)).collect();
    let events: Vec<EventRecord> = domain.events.iter().map(|e| compile_event(e, ctx)).collect();

    let mut names = HashSet::new();
    let type_names = declarations.iter().map(|d| d.name());
    let event_names = events.iter().map(|e| e.ident.as_str());
    for name in type_names.chain(event_names) {
        if !names.insert(name) {
            return Err(CompileError::DuplicateDeclaration {
                domain: domain.name.clone(),
                name: name.to_string(),
            });
        }
    }
    let mut fn_names = HashSet::new();
    for c in &commands {
        if !fn_names.insert(c.ident.as_str()) {
            return Err(CompileError::DuplicateDeclaration {
                domain: domain.name.clone(),
                name: c.ident.clone(),
            });
        }
    }

    let records = declarations.iter().filter_map(|d| match d {
        Declaration::Record(r) => Some((r.name.as_str(), r.fields.as_slice())),
        _ => None,
    });
    let payloads = events.iter().map(|e| (e.ident.as_str(), e.fields.as_slice()));
    let arguments = commands.iter().map(|c| (c.ident.as_str(), c.parameters.as_slice()));
    for (owner, fields) in records.chain(payloads).chain(arguments) {
        if let Some(ident) = duplicate_ident(fields) {
            return Err(CompileError::DuplicateDeclaration {
                domain: domain.name.clone(),
                name: format!("{}.{}", owner, ident),
            });
        }
    }

    Ok(ModulePlan {
        domain: domain.name.clone(),
        module: module_name(&domain.name),
        description: domain.description.clone(),
        experimental: domain.experimental,
        deprecated: domain.deprecated,
        imports: domain_imports(domain),
        declarations,
        commands,
        events,
    })
}

/// First Rust identifier shared by two fields (`nodeId` and `node_id`).
fn duplicate_ident(fields: &[FieldPlan]) -> Option<&str> {
    let mut seen = HashSet::new();
    fields.iter().map(|f| f.ident.as_str()).find(|ident| !seen.insert(*ident))
}

/// A domain that failed to compile. Its module must not be used.
#[derive(Debug)]
pub struct DomainFailure {
    pub domain: String,
    pub error: CompileError,
}

/// Result of compiling every domain of a protocol.
#[derive(Debug, Default)]
pub struct CompileReport {
    pub modules: Vec<ModulePlan>,
    pub failures: Vec<DomainFailure>,
}

impl CompileReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn module(&self, domain: &str) -> Option<&ModulePlan> {
        self.modules.iter().find(|m| m.domain == domain)
    }
}

/// Compile every domain independently; a failing domain does not stop the others.
pub fn compile_protocol(protocol: &Protocol) -> CompileReport {
    let ctx = CompileContext::new(protocol);
    let mut report = CompileReport::default();
    for domain in &protocol.domains {
        match compile_domain(domain, &ctx) {
            Ok(plan) => report.modules.push(plan),
            Err(error) => {
                warn!("Domain {} failed to compile: {}", domain.name, error);
                report.failures.push(DomainFailure {
                    domain: domain.name.clone(),
                    error,
                });
            }
        }
    }
    report
}
