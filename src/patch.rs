//! Corrective edits for known defects of the published schema.
//!
//! Each patch names one element by domain, declaration and field. A patch whose
//! target is missing is skipped, so schema revisions that fix a defect upstream
//! keep working. Applying the list any number of times yields the same model.

use crate::ast::{Leaf, Property, Protocol, TypeBody};
use tracing::debug;

/// Element a patch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    CommandParameter {
        command: &'static str,
        parameter: &'static str,
    },
    EventDescription {
        event: &'static str,
    },
    TypeProperty {
        type_id: &'static str,
        property: &'static str,
    },
}

/// What to change on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Replace the property's shape with a reference to the given type.
    SetReference(&'static str),
    /// Remove every occurrence of a character from the description.
    StripChar(char),
    MarkOptional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub domain: &'static str,
    pub target: PatchTarget,
    pub edit: Edit,
}

/// Fixes applied before compilation.
pub const PROTOCOL_FIXES: &[Patch] = &[
    // `backendNodeId` carries a `$ref` that points back at itself.
    Patch {
        domain: "DOM",
        target: PatchTarget::CommandParameter {
            command: "resolveNode",
            parameter: "backendNodeId",
        },
        edit: Edit::SetReference("BackendNodeId"),
    },
    Patch {
        domain: "Page",
        target: PatchTarget::EventDescription {
            event: "screencastVisibilityChanged",
        },
        edit: Edit::StripChar('`'),
    },
    // Session cookies are reported without an expiry.
    Patch {
        domain: "Network",
        target: PatchTarget::TypeProperty {
            type_id: "Cookie",
            property: "expires",
        },
        edit: Edit::MarkOptional,
    },
];

/// Apply [`PROTOCOL_FIXES`]. Returns how many targets were found.
pub fn fix_protocol(protocol: &mut Protocol) -> usize {
    apply_patches(protocol, PROTOCOL_FIXES)
}

/// Apply `patches` in order. Missing targets are skipped silently.
pub fn apply_patches(protocol: &mut Protocol, patches: &[Patch]) -> usize {
    let mut applied = 0;
    for patch in patches {
        if apply_one(protocol, patch) {
            debug!("Applied patch {:?} to domain {}", patch.target, patch.domain);
            applied += 1;
        } else {
            debug!("Patch target {:?} not found in domain {}", patch.target, patch.domain);
        }
    }
    applied
}

fn apply_one(protocol: &mut Protocol, patch: &Patch) -> bool {
    let domain = match protocol.domain_mut(patch.domain) {
        Some(d) => d,
        None => return false,
    };
    match patch.target {
        PatchTarget::CommandParameter { command, parameter } => domain
            .commands
            .iter_mut()
            .find(|c| c.name == command)
            .and_then(|c| find_property(&mut c.parameters, parameter))
            .map(|p| edit_property(p, patch.edit))
            .is_some(),
        PatchTarget::EventDescription { event } => domain
            .events
            .iter_mut()
            .find(|e| e.name == event)
            .and_then(|e| e.description.as_mut())
            .map(|d| edit_description(d, patch.edit))
            .is_some(),
        PatchTarget::TypeProperty { type_id, property } => domain
            .types
            .iter_mut()
            .find(|t| t.id == type_id)
            .and_then(|t| match &mut t.body {
                TypeBody::Record(props) => find_property(props, property),
                _ => None,
            })
            .map(|p| edit_property(p, patch.edit))
            .is_some(),
    }
}

fn find_property<'a>(props: &'a mut [Property], name: &str) -> Option<&'a mut Property> {
    props.iter_mut().find(|p| p.name == name)
}

fn edit_property(prop: &mut Property, edit: Edit) {
    match edit {
        Edit::SetReference(target) => prop.leaf = Leaf::Reference(target.to_string()),
        Edit::MarkOptional => prop.optional = true,
        Edit::StripChar(c) => {
            if let Some(d) = prop.description.as_mut() {
                edit_description(d, Edit::StripChar(c));
            }
        }
    }
}

fn edit_description(description: &mut String, edit: Edit) {
    if let Edit::StripChar(c) = edit {
        description.retain(|ch| ch != c);
    }
}
