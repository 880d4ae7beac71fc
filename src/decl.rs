//! Declaration compiler: one top-level IDL type becomes an enum, a record or an alias.

use crate::ast::{AliasTarget, PrimitiveKind, TypeBody, TypeDecl};
use crate::domain::CompileContext;
use crate::error::CompileError;
use crate::naming::variant_name;
use crate::resolve::TypeRef;
use crate::shape::{required_first, FieldPlan, FieldRole, Shape};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Enum(EnumDecl),
    Record(RecordDecl),
    Alias(AliasDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Enum(d) => &d.name,
            Declaration::Record(d) => &d.name,
            Declaration::Alias(d) => &d.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Declaration::Enum(d) => d.description.as_deref(),
            Declaration::Record(d) => d.description.as_deref(),
            Declaration::Alias(d) => d.description.as_deref(),
        }
    }
}

/// A closed set of string constants.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub description: Option<String>,
    /// (Rust variant, wire value) in IDL order.
    pub variants: Vec<(String, String)>,
}

impl EnumDecl {
    pub fn contains(&self, wire: &str) -> bool {
        self.variants.iter().any(|(_, w)| w == wire)
    }
}

/// An aggregate; `fields` are already ordered required-first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldPlan>,
}

/// A distinct named type wrapping a primitive or a list.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDecl {
    pub name: String,
    pub description: Option<String>,
    pub shape: Shape,
}

impl AliasDecl {
    /// `Eq` cannot be derived for aliases that contain floats or JSON values.
    pub fn is_eq(&self) -> bool {
        match self.shape.required() {
            Shape::Primitive(kind) => matches!(
                kind,
                PrimitiveKind::Boolean | PrimitiveKind::Integer | PrimitiveKind::String
            ),
            Shape::List(inner) => matches!(
                inner.as_ref(),
                Shape::Primitive(PrimitiveKind::Boolean | PrimitiveKind::Integer | PrimitiveKind::String)
            ),
            _ => false,
        }
    }
}

pub fn compile_type(ty: &TypeDecl, ctx: &CompileContext) -> Result<Declaration, CompileError> {
    debug!("Generating type {}.{}", ty.domain, ty.id);
    let description = ty.description.clone();
    match &ty.body {
        TypeBody::Enum(values) => Ok(Declaration::Enum(EnumDecl {
            name: ty.id.clone(),
            description,
            variants: enum_variants(values, &format!("{}.{}", ty.domain, ty.id))?,
        })),
        TypeBody::Record(props) => {
            let owner = TypeRef {
                domain: ty.domain.clone(),
                name: ty.id.clone(),
                local: true,
            };
            let fields = props
                .iter()
                .map(|p| {
                    let mut f = FieldPlan::new(p, FieldRole::Declaration);
                    box_if_recursive(&mut f.shape, &owner, ctx);
                    f
                })
                .collect();
            Ok(Declaration::Record(RecordDecl {
                name: ty.id.clone(),
                description,
                fields: required_first(fields),
            }))
        }
        TypeBody::Alias(target) => {
            let shape = match target {
                AliasTarget::Primitive(kind) => Shape::Primitive(*kind),
                AliasTarget::Repeated(items) => Shape::List(Box::new(Shape::from_items(items, &ty.domain))),
            };
            Ok(Declaration::Alias(AliasDecl {
                name: ty.id.clone(),
                description,
                shape,
            }))
        }
    }
}

/// Variant names for the wire values; two values with the same variant are a defect.
pub fn enum_variants(values: &[String], location: &str) -> Result<Vec<(String, String)>, CompileError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        let variant = variant_name(value);
        if let Some(first) = seen.insert(variant.clone(), value) {
            if first == value.as_str() {
                continue;
            }
            return Err(CompileError::EnumNameCollision {
                location: location.to_string(),
                constant: variant,
                first: first.to_string(),
                second: value.clone(),
            });
        }
        out.push((variant, value.clone()));
    }
    Ok(out)
}

fn box_if_recursive(shape: &mut Shape, owner: &TypeRef, ctx: &CompileContext) {
    match shape {
        Shape::Reference { target, boxed } => *boxed = ctx.graph().is_recursive(owner, target),
        Shape::Optional(inner) => box_if_recursive(inner, owner, ctx),
        Shape::List(_) | Shape::Primitive(_) => {}
    }
}
