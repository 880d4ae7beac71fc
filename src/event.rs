//! Event compiler: a notification becomes a receive-only record tagged with its wire name.

use crate::ast::Event;
use crate::domain::CompileContext;
use crate::naming::pascal_case;
use crate::shape::{required_first, FieldPlan, FieldRole};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub name: String,
    /// Rust struct name, e.g. `ScreencastVisibilityChanged`.
    pub ident: String,
    /// `Domain.name`, used to route incoming notifications.
    pub method: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated_since: Option<String>,
    /// Payload fields, required first. No type refers to an event struct, so
    /// references are never boxed here.
    pub fields: Vec<FieldPlan>,
}

pub fn compile_event(event: &Event, ctx: &CompileContext) -> EventRecord {
    debug!("Generating event {}.{}", event.domain, event.name);
    let fields = event
        .parameters
        .iter()
        .map(|p| FieldPlan::new(p, FieldRole::Declaration))
        .collect();
    EventRecord {
        name: event.name.clone(),
        ident: pascal_case(&event.name),
        method: format!("{}.{}", event.domain, event.name),
        description: event.description.clone(),
        experimental: event.experimental,
        deprecated_since: event.deprecated.then(|| ctx.version().to_string()),
        fields: required_first(fields),
    }
}
