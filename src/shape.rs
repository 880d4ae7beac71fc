//! Value shapes and their fixed Rust expression forms.
//!
//! Every field of a record, parameter of a command, return value or event field
//! becomes a [`FieldPlan`]. The plan's [`Shape`] decides the Rust type, the
//! expression that encodes a value into JSON and the expression that decodes it
//! back. The encode and decode forms of each shape are inverses.

use crate::ast::{Items, Leaf, PrimitiveKind, Property};
use crate::naming::{parameter_name, snake_case};
use crate::resolve::TypeRef;

/// Rust shape of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Primitive(PrimitiveKind),
    Reference {
        target: TypeRef,
        /// Rendered as `Box<_>` because the target can contain the owner.
        boxed: bool,
    },
    /// Element is always `Primitive` or an unboxed `Reference`.
    List(Box<Shape>),
    Optional(Box<Shape>),
}

impl Shape {
    pub fn from_items(items: &Items, domain: &str) -> Self {
        match items {
            Items::Primitive(kind) => Shape::Primitive(*kind),
            Items::Reference(r) => Shape::Reference {
                target: TypeRef::parse(r, domain),
                boxed: false,
            },
        }
    }

    /// Shape of a property leaf, without the optional wrapper.
    pub fn from_leaf(leaf: &Leaf, domain: &str) -> Self {
        match leaf {
            Leaf::Primitive(kind) => Shape::Primitive(*kind),
            Leaf::Reference(r) => Shape::Reference {
                target: TypeRef::parse(r, domain),
                boxed: false,
            },
            Leaf::Repeated(items) => Shape::List(Box::new(Shape::from_items(items, domain))),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Shape::Optional(_))
    }

    /// `any` values carry JSON `null` as a value, so a present `null` is not absence.
    pub fn keeps_null(&self) -> bool {
        matches!(self.required(), Shape::Primitive(PrimitiveKind::Any))
    }

    /// The shape under an optional wrapper (or the shape itself).
    pub fn required(&self) -> &Shape {
        match self {
            Shape::Optional(inner) => inner,
            other => other,
        }
    }

    /// The referenced type, directly or as a list element.
    pub fn reference(&self) -> Option<&TypeRef> {
        match self {
            Shape::Reference { target, .. } => Some(target),
            Shape::List(inner) | Shape::Optional(inner) => inner.reference(),
            Shape::Primitive(_) => None,
        }
    }

    pub fn type_expr(&self) -> String {
        match self {
            Shape::Primitive(kind) => primitive_type(*kind).to_string(),
            Shape::Reference { target, boxed: false } => target.target_path(),
            Shape::Reference { target, boxed: true } => format!("Box<{}>", target.target_path()),
            Shape::List(inner) => format!("Vec<{}>", inner.type_expr()),
            Shape::Optional(inner) => format!("Option<{}>", inner.type_expr()),
        }
    }

    /// Expression turning the place `value` (not a reference) into `serde_json::Value`.
    ///
    /// Not defined for `Optional`; optional values are encoded by [`FieldPlan::encode_stmt`].
    pub fn encode_expr(&self, value: &str) -> String {
        match self {
            Shape::Primitive(_) => format!("serde_json::Value::from({}.clone())", value),
            Shape::Reference { .. } => format!("{}.to_json()", value),
            Shape::List(inner) => match inner.as_ref() {
                Shape::Reference { .. } => format!(
                    "serde_json::Value::Array({}.iter().map(|i| i.to_json()).collect())",
                    value
                ),
                _ => format!(
                    "serde_json::Value::Array({}.iter().cloned().map(serde_json::Value::from).collect())",
                    value
                ),
            },
            Shape::Optional(inner) => inner.encode_expr(value),
        }
    }

    /// Expression of type `Result<T, util::CdpError>` decoding the `&serde_json::Value` `json`.
    pub fn decode_expr(&self, json: &str) -> String {
        match self {
            Shape::Primitive(kind) => format!("util::decode_{}({})", kind.wire_name(), json),
            Shape::Reference { target, boxed: false } => {
                format!("{}::from_json({})", target.target_path(), json)
            }
            Shape::Reference { target, boxed: true } => {
                format!("{}::from_json({}).map(Box::new)", target.target_path(), json)
            }
            Shape::List(inner) => format!("util::decode_array({}, {})", json, inner.decoder()),
            Shape::Optional(inner) => inner.decode_expr(json),
        }
    }

    /// A function path or closure `fn(&serde_json::Value) -> Result<T, util::CdpError>`.
    pub fn decoder(&self) -> String {
        match self {
            Shape::Primitive(kind) => format!("util::decode_{}", kind.wire_name()),
            Shape::Reference { target, boxed: false } => format!("{}::from_json", target.target_path()),
            Shape::Optional(inner) => inner.decoder(),
            other => format!("|j: &serde_json::Value| {}", other.decode_expr("j")),
        }
    }
}

pub fn primitive_type(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Integer => "i64",
        PrimitiveKind::Number => "f64",
        PrimitiveKind::String => "String",
        PrimitiveKind::Object => "util::JsonMap",
        PrimitiveKind::Any => "serde_json::Value",
    }
}

/// Where a field is rendered. Drives identifier choice and documentation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Field of a record or event struct.
    Declaration,
    /// Argument of a command function.
    Parameter,
    /// Decoded value of a command response.
    Return,
}

/// A compiled field: wire name, Rust identifier, shape and documentation flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    pub wire_name: String,
    pub ident: String,
    pub shape: Shape,
    pub role: FieldRole,
    pub description: Option<String>,
    pub enum_values: Option<Vec<String>>,
    pub experimental: bool,
    pub deprecated: bool,
}

impl FieldPlan {
    pub fn new(prop: &Property, role: FieldRole) -> Self {
        let leaf = Shape::from_leaf(&prop.leaf, &prop.domain);
        let shape = if prop.optional {
            Shape::Optional(Box::new(leaf))
        } else {
            leaf
        };
        let ident = match role {
            FieldRole::Parameter => parameter_name(&prop.name),
            FieldRole::Declaration | FieldRole::Return => snake_case(&prop.name),
        };
        FieldPlan {
            wire_name: prop.name.clone(),
            ident,
            shape,
            role,
            description: prop.description.clone(),
            enum_values: prop.enum_values.clone(),
            experimental: prop.experimental,
            deprecated: prop.deprecated,
        }
    }

    pub fn optional(&self) -> bool {
        self.shape.is_optional()
    }

    /// Statement inserting this field into the `JsonMap` named `map`.
    ///
    /// `place` is the expression holding the value (`self.node_id` or `node_id`).
    /// An absent optional value is left out of the map.
    pub fn encode_stmt(&self, map: &str, place: &str) -> String {
        match &self.shape {
            Shape::Optional(inner) => format!(
                "if let Some(v) = &{} {{\n    {}.insert(\"{}\".to_owned(), {});\n}}",
                place,
                map,
                self.wire_name,
                inner.encode_expr("v")
            ),
            shape => format!(
                "{}.insert(\"{}\".to_owned(), {});",
                map,
                self.wire_name,
                shape.encode_expr(place)
            ),
        }
    }

    /// Expression of the field's Rust type read from the `&util::JsonMap` named `map`.
    ///
    /// A missing required key fails with `MissingField`; a missing or `null`
    /// optional key becomes `None`, except for `any` where `null` is a value.
    pub fn decode_expr(&self, map: &str) -> String {
        match &self.shape {
            Shape::Optional(inner) => format!(
                "util::{}({}, \"{}\").map({}).transpose()?",
                if inner.keeps_null() { "optional_any" } else { "optional" },
                map,
                self.wire_name,
                inner.decoder()
            ),
            shape => format!(
                "{}?",
                shape.decode_expr(&format!("util::required({}, \"{}\")?", map, self.wire_name))
            ),
        }
    }

    /// `ident: Type` as it appears in a struct or a function signature.
    pub fn declaration(&self) -> String {
        match self.role {
            FieldRole::Declaration => format!("pub {}: {}", self.ident, self.shape.type_expr()),
            FieldRole::Parameter | FieldRole::Return => {
                format!("{}: {}", self.ident, self.shape.type_expr())
            }
        }
    }

    /// One line of documentation, tagged by role.
    pub fn doc_line(&self) -> String {
        let mut tags = Vec::new();
        if self.role == FieldRole::Parameter {
            if self.deprecated {
                tags.push("**(DEPRECATED)**");
            }
            if self.experimental {
                tags.push("**(EXPERIMENTAL)**");
            }
        }
        if self.optional() && self.role != FieldRole::Declaration {
            tags.push("*(Optional)*");
        }
        let mut line = match self.role {
            FieldRole::Parameter | FieldRole::Return => format!("* `{}`:", self.ident),
            FieldRole::Declaration => String::new(),
        };
        for t in tags {
            line.push(' ');
            line.push_str(t);
        }
        if let Some(d) = &self.description {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&d.replace('\n', " "));
        }
        if let Some(values) = &self.enum_values {
            if !line.is_empty() {
                line.push(' ');
            }
            let quoted: Vec<String> = values.iter().map(|v| format!("`{}`", v)).collect();
            line.push_str(&format!("Allowed values: {}.", quoted.join(", ")));
        }
        line.trim().to_string()
    }
}

/// Stable partition: required fields first, each group in IDL order.
pub fn required_first(mut fields: Vec<FieldPlan>) -> Vec<FieldPlan> {
    fields.sort_by_key(FieldPlan::optional);
    fields
}
