//! Command compiler: a request/response exchange becomes a two-phase binding.
//!
//! The generated function builds the request descriptor without suspending;
//! the caller sends it, then resumes the binding exactly once with the response
//! mapping, which is decoded into the declared returns.

use crate::ast::Command;
use crate::domain::CompileContext;
use crate::naming::snake_case;
use crate::shape::{required_first, FieldPlan, FieldRole};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CommandBinding {
    /// Wire name, e.g. `getEventListeners`.
    pub name: String,
    /// Rust function name, e.g. `get_event_listeners`.
    pub ident: String,
    /// `Domain.name`.
    pub method: String,
    pub description: Option<String>,
    pub experimental: bool,
    /// Protocol version to stamp on the deprecation marker.
    pub deprecated_since: Option<String>,
    /// Signature order: required first, then optional.
    pub parameters: Vec<FieldPlan>,
    /// Declaration order; decoded in this order.
    pub returns: Vec<FieldPlan>,
    /// Whether the request carries a `params` mapping at all.
    pub has_params: bool,
}

/// What the resumed binding completes with.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput<'a> {
    Unit,
    Single(&'a FieldPlan),
    Tuple(&'a [FieldPlan]),
}

impl CommandBinding {
    pub fn output(&self) -> CommandOutput<'_> {
        match self.returns.as_slice() {
            [] => CommandOutput::Unit,
            [single] => CommandOutput::Single(single),
            many => CommandOutput::Tuple(many),
        }
    }

    /// Rust type of the completed value: `()`, `T` or `(T1, T2, ..)`.
    pub fn output_type(&self) -> String {
        match self.output() {
            CommandOutput::Unit => "()".to_string(),
            CommandOutput::Single(f) => f.shape.type_expr(),
            CommandOutput::Tuple(fields) => {
                let types: Vec<String> = fields.iter().map(|f| f.shape.type_expr()).collect();
                format!("({})", types.join(", "))
            }
        }
    }

    /// Body of the response decoder, an expression of type `Result<T, util::CdpError>`
    /// reading from the `&util::JsonMap` named `json`.
    pub fn decode_body(&self) -> String {
        match self.output() {
            CommandOutput::Unit => "Ok(())".to_string(),
            CommandOutput::Single(f) => format!("Ok({})", f.decode_expr("json")),
            CommandOutput::Tuple(fields) => {
                let parts: Vec<String> = fields.iter().map(|f| f.decode_expr("json")).collect();
                format!("Ok(({}))", parts.join(", "))
            }
        }
    }
}

pub fn compile_command(command: &Command, ctx: &CompileContext) -> CommandBinding {
    debug!("Generating command {}.{}", command.domain, command.name);
    let parameters = command
        .parameters
        .iter()
        .map(|p| FieldPlan::new(p, FieldRole::Parameter))
        .collect();
    let returns = command
        .returns
        .iter()
        .map(|p| FieldPlan::new(p, FieldRole::Return))
        .collect();
    CommandBinding {
        name: command.name.clone(),
        ident: snake_case(&command.name),
        method: format!("{}.{}", command.domain, command.name),
        description: command.description.clone(),
        experimental: command.experimental,
        deprecated_since: command.deprecated.then(|| ctx.version().to_string()),
        parameters: required_first(parameters),
        returns,
        has_params: !command.parameters.is_empty(),
    }
}
