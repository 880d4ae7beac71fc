//! Encode/decode JSON values from compiled module plans.
//!
//! The codec interprets the same per-shape rules the renderer emits as Rust
//! source, so a compiled protocol can be exercised without building the
//! generated crate: records drop absent optional fields on encode and bring
//! them back as [`Value::Absent`] on decode, enums accept only declared values.

use crate::decl::{Declaration, EnumDecl};
use crate::domain::ModulePlan;
use crate::ast::PrimitiveKind;
use crate::command::CommandBinding;
use crate::event::EventRecord;
use crate::shape::{FieldPlan, Shape};
use crate::value::Value;
use serde_json::Map;
use std::collections::{BTreeMap, HashMap};

pub type JsonMap = Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CodecError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },
    #[error("invalid value `{value}` for enum {type_name}")]
    InvalidEnumValue { type_name: String, value: String },
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown field `{field}`")]
    UnknownField { field: String },
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown event: {0}")]
    UnknownEvent(String),
}

/// All declarations, commands and events of a set of compiled modules.
#[derive(Debug, Default)]
pub struct Codec {
    types: HashMap<String, Declaration>,
    commands: HashMap<String, CommandBinding>,
    events: HashMap<String, EventRecord>,
}

impl Codec {
    pub fn new(modules: &[ModulePlan]) -> Self {
        let mut codec = Codec::default();
        for m in modules {
            for d in &m.declarations {
                codec.types.insert(format!("{}.{}", m.domain, d.name()), d.clone());
            }
            for c in &m.commands {
                codec.commands.insert(c.method.clone(), c.clone());
            }
            for e in &m.events {
                codec.events.insert(e.method.clone(), e.clone());
            }
        }
        codec
    }

    /// Declaration of `Domain.Type`.
    pub fn declaration(&self, qualified: &str) -> Option<&Declaration> {
        self.types.get(qualified)
    }

    pub fn command(&self, method: &str) -> Result<&CommandBinding, CodecError> {
        self.commands
            .get(method)
            .ok_or_else(|| CodecError::UnknownCommand(method.to_string()))
    }

    pub fn event(&self, method: &str) -> Result<&EventRecord, CodecError> {
        self.events
            .get(method)
            .ok_or_else(|| CodecError::UnknownEvent(method.to_string()))
    }

    /// Encode a value of the type `Domain.Type`.
    pub fn encode_type(&self, qualified: &str, value: &Value) -> Result<serde_json::Value, CodecError> {
        let decl = self.lookup(qualified)?;
        self.encode_declaration(decl, value)
    }

    /// Decode a value of the type `Domain.Type`.
    pub fn decode_type(&self, qualified: &str, json: &serde_json::Value) -> Result<Value, CodecError> {
        let decl = self.lookup(qualified)?;
        self.decode_declaration(decl, json)
    }

    /// Decode the `params` of an incoming notification.
    pub fn decode_event(&self, method: &str, params: &serde_json::Value) -> Result<Value, CodecError> {
        let event = self.event(method)?;
        let map = as_map(params)?;
        Ok(Value::Record(self.decode_fields(&event.fields, &map)?))
    }

    fn lookup(&self, qualified: &str) -> Result<&Declaration, CodecError> {
        self.types
            .get(qualified)
            .ok_or_else(|| CodecError::UnknownType(qualified.to_string()))
    }

    fn encode_declaration(&self, decl: &Declaration, value: &Value) -> Result<serde_json::Value, CodecError> {
        match decl {
            Declaration::Enum(e) => encode_enum(e, value),
            Declaration::Record(r) => match value {
                Value::Record(fields) => Ok(serde_json::Value::Object(self.encode_fields(&r.fields, fields)?)),
                other => Err(mismatch("record", other.kind())),
            },
            Declaration::Alias(a) => self.encode_shape(&a.shape, value),
        }
    }

    fn decode_declaration(&self, decl: &Declaration, json: &serde_json::Value) -> Result<Value, CodecError> {
        match decl {
            Declaration::Enum(e) => decode_enum(e, json),
            Declaration::Record(r) => {
                let map = json.as_object().ok_or_else(|| mismatch("object", json_kind(json)))?;
                Ok(Value::Record(self.decode_fields(&r.fields, map)?))
            }
            Declaration::Alias(a) => self.decode_shape(&a.shape, json),
        }
    }

    /// Encode record fields or command parameters. Absent optional values are omitted.
    pub fn encode_fields(
        &self,
        fields: &[FieldPlan],
        values: &BTreeMap<String, Value>,
    ) -> Result<JsonMap, CodecError> {
        if let Some(unknown) = values.keys().find(|k| !fields.iter().any(|f| &f.wire_name == *k)) {
            return Err(CodecError::UnknownField { field: unknown.clone() });
        }
        let mut out = JsonMap::new();
        for f in fields {
            match values.get(&f.wire_name) {
                None | Some(Value::Absent) if f.optional() => {}
                None | Some(Value::Absent) => {
                    return Err(CodecError::MissingField {
                        field: f.wire_name.clone(),
                    })
                }
                Some(v) => {
                    out.insert(f.wire_name.clone(), self.encode_shape(f.shape.required(), v)?);
                }
            }
        }
        Ok(out)
    }

    /// Decode record fields, event payloads or command returns from a mapping.
    pub fn decode_fields(
        &self,
        fields: &[FieldPlan],
        map: &JsonMap,
    ) -> Result<BTreeMap<String, Value>, CodecError> {
        fields
            .iter()
            .map(|f| Ok((f.wire_name.clone(), self.decode_field(f, map)?)))
            .collect()
    }

    pub fn decode_field(&self, field: &FieldPlan, map: &JsonMap) -> Result<Value, CodecError> {
        match (map.get(&field.wire_name), field.optional()) {
            (None, true) => Ok(Value::Absent),
            (Some(serde_json::Value::Null), true) if !field.shape.keeps_null() => Ok(Value::Absent),
            (None, false) => Err(CodecError::MissingField {
                field: field.wire_name.clone(),
            }),
            (Some(json), _) => self.decode_shape(field.shape.required(), json),
        }
    }

    fn encode_shape(&self, shape: &Shape, value: &Value) -> Result<serde_json::Value, CodecError> {
        match shape {
            Shape::Primitive(kind) => encode_primitive(*kind, value),
            Shape::Reference { target, .. } => self.encode_type(&target.qualified(), value),
            Shape::List(inner) => match value {
                Value::List(items) => items
                    .iter()
                    .map(|v| self.encode_shape(inner, v))
                    .collect::<Result<Vec<_>, _>>()
                    .map(serde_json::Value::Array),
                other => Err(mismatch("list", other.kind())),
            },
            Shape::Optional(inner) => match value {
                Value::Absent => Ok(serde_json::Value::Null),
                v => self.encode_shape(inner, v),
            },
        }
    }

    fn decode_shape(&self, shape: &Shape, json: &serde_json::Value) -> Result<Value, CodecError> {
        match shape {
            Shape::Primitive(kind) => decode_primitive(*kind, json),
            Shape::Reference { target, .. } => self.decode_type(&target.qualified(), json),
            Shape::List(inner) => match json {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|j| self.decode_shape(inner, j))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
                other => Err(mismatch("array", json_kind(other))),
            },
            Shape::Optional(inner) => match json {
                serde_json::Value::Null if !inner.keeps_null() => Ok(Value::Absent),
                j => self.decode_shape(inner, j),
            },
        }
    }
}

fn encode_enum(decl: &EnumDecl, value: &Value) -> Result<serde_json::Value, CodecError> {
    match value {
        Value::Enum(s) | Value::String(s) if decl.contains(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Enum(s) | Value::String(s) => Err(CodecError::InvalidEnumValue {
            type_name: decl.name.clone(),
            value: s.clone(),
        }),
        other => Err(mismatch("enum", other.kind())),
    }
}

fn decode_enum(decl: &EnumDecl, json: &serde_json::Value) -> Result<Value, CodecError> {
    let s = json.as_str().ok_or_else(|| mismatch("string", json_kind(json)))?;
    if decl.contains(s) {
        Ok(Value::Enum(s.to_string()))
    } else {
        Err(CodecError::InvalidEnumValue {
            type_name: decl.name.clone(),
            value: s.to_string(),
        })
    }
}

fn encode_primitive(kind: PrimitiveKind, value: &Value) -> Result<serde_json::Value, CodecError> {
    match (kind, value) {
        (PrimitiveKind::Boolean, Value::Bool(b)) => Ok(serde_json::Value::Bool(*b)),
        (PrimitiveKind::Integer, Value::Integer(i)) => Ok(serde_json::Value::from(*i)),
        (PrimitiveKind::Number, Value::Number(n)) => Ok(serde_json::Value::from(*n)),
        (PrimitiveKind::Number, Value::Integer(i)) => Ok(serde_json::Value::from(*i as f64)),
        (PrimitiveKind::String, Value::String(s)) => Ok(serde_json::Value::String(s.clone())),
        (PrimitiveKind::Object, Value::Object(m)) => Ok(serde_json::Value::Object(m.clone())),
        (PrimitiveKind::Any, Value::Any(v)) => Ok(v.clone()),
        (kind, other) => Err(mismatch(kind.wire_name(), other.kind())),
    }
}

fn decode_primitive(kind: PrimitiveKind, json: &serde_json::Value) -> Result<Value, CodecError> {
    let wrong = || mismatch(kind.wire_name(), json_kind(json));
    match kind {
        PrimitiveKind::Boolean => json.as_bool().map(Value::Bool).ok_or_else(wrong),
        PrimitiveKind::Integer => integral(json)
            .map(Value::Integer)
            .ok_or_else(wrong),
        PrimitiveKind::Number => json.as_f64().map(Value::Number).ok_or_else(wrong),
        PrimitiveKind::String => json
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(wrong),
        PrimitiveKind::Object => json
            .as_object()
            .map(|m| Value::Object(m.clone()))
            .ok_or_else(wrong),
        PrimitiveKind::Any => Ok(Value::Any(json.clone())),
    }
}

/// An integer, or a float with no fractional part inside the `i64` range.
fn integral(json: &serde_json::Value) -> Option<i64> {
    json.as_i64().or_else(|| {
        json.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// A `null` mapping is treated as empty (commands without returns, events without payload).
pub(crate) fn as_map(json: &serde_json::Value) -> Result<std::borrow::Cow<'_, JsonMap>, CodecError> {
    match json {
        serde_json::Value::Object(m) => Ok(std::borrow::Cow::Borrowed(m)),
        serde_json::Value::Null => Ok(std::borrow::Cow::Owned(JsonMap::new())),
        other => Err(mismatch("object", json_kind(other))),
    }
}

fn mismatch(expected: &'static str, found: &'static str) -> CodecError {
    CodecError::TypeMismatch { expected, found }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
