//! Type reference resolution and computed domain imports.
//!
//! A reference is `TypeName` (current domain) or `Domain.TypeName`. Resolution is
//! permissive: a name that does not exist anywhere is still resolved as written.

use crate::ast::{Domain, Leaf, Protocol, TypeBody};
use crate::naming::module_name;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A reference split into its owning domain and type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub domain: String,
    pub name: String,
    /// `true` when the type lives in the domain that refers to it.
    pub local: bool,
}

impl TypeRef {
    /// Split `reference` as seen from `current_domain`.
    pub fn parse(reference: &str, current_domain: &str) -> Self {
        match reference.split_once('.') {
            Some((domain, name)) => TypeRef {
                domain: domain.to_string(),
                name: name.to_string(),
                local: domain == current_domain,
            },
            None => TypeRef {
                domain: current_domain.to_string(),
                name: reference.to_string(),
                local: true,
            },
        }
    }

    /// Rust path of the type from inside the referring module.
    pub fn target_path(&self) -> String {
        if self.local {
            self.name.clone()
        } else {
            format!("{}::{}", module_name(&self.domain), self.name)
        }
    }

    /// `Domain.TypeName`, independent of the referring domain.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.domain, self.name)
    }
}

/// Resolve a reference string to the Rust type name used inside `current_domain`.
pub fn resolve_reference(reference: &str, current_domain: &str) -> String {
    TypeRef::parse(reference, current_domain).target_path()
}

/// Every reference a domain mentions, in declaration order (types, commands, events).
pub fn domain_references(domain: &Domain) -> Vec<&str> {
    let mut refs = Vec::new();
    for t in &domain.types {
        refs.extend(t.references());
    }
    for c in &domain.commands {
        refs.extend(c.references());
    }
    for e in &domain.events {
        refs.extend(e.references());
    }
    refs
}

/// Domains this domain must import, computed from its references.
///
/// The IDL's own `dependencies` list is ignored: it is not complete enough for a
/// type-checked module. The domain itself never appears.
pub fn domain_imports(domain: &Domain) -> BTreeSet<String> {
    domain_references(domain)
        .into_iter()
        .map(|r| TypeRef::parse(r, &domain.name))
        .filter(|r| !r.local)
        .map(|r| r.domain)
        .collect()
}

/// Direct (non-repeated) reference edges between record types, across all domains.
///
/// A field whose target can reach back to the owning record through these edges
/// would give the record infinite size and has to be boxed.
#[derive(Debug, Default, Clone)]
pub struct ReferenceGraph {
    edges: HashMap<(String, String), Vec<(String, String)>>,
}

impl ReferenceGraph {
    pub fn build(protocol: &Protocol) -> Self {
        let mut edges: HashMap<(String, String), Vec<(String, String)>> = HashMap::new();
        for domain in &protocol.domains {
            for t in &domain.types {
                let props = match &t.body {
                    TypeBody::Record(props) => props,
                    _ => continue,
                };
                let targets = props
                    .iter()
                    .filter_map(|p| match &p.leaf {
                        Leaf::Reference(r) => Some(TypeRef::parse(r, &domain.name)),
                        _ => None,
                    })
                    .map(|r| (r.domain, r.name))
                    .collect();
                edges.insert((domain.name.clone(), t.id.clone()), targets);
            }
        }
        ReferenceGraph { edges }
    }

    /// Whether `target` reaches `owner` (or is `owner`) through direct references.
    pub fn is_recursive(&self, owner: &TypeRef, target: &TypeRef) -> bool {
        let goal = (owner.domain.clone(), owner.name.clone());
        let start = (target.domain.clone(), target.name.clone());
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(node) = stack.pop() {
            if node == goal {
                return true;
            }
            if !seen.insert(node.clone()) {
                continue;
            }
            if let Some(next) = self.edges.get(&node) {
                stack.extend(next.iter().cloned());
            }
        }
        false
    }
}
