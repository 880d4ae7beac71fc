// DO NOT EDIT THIS FILE!
//
// This file is generated from the CDP specification. If you need to make
// changes, edit the generator and regenerate all of the modules.

//! Runtime support shared by the generated domain modules.

use std::fmt;

pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Failure while decoding a protocol value.
#[derive(Debug, Clone, PartialEq)]
pub enum CdpError {
    MissingField(&'static str),
    InvalidEnumValue {
        type_name: &'static str,
        value: String,
    },
    TypeMismatch {
        expected: &'static str,
        found: serde_json::Value,
    },
}

impl fmt::Display for CdpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdpError::MissingField(name) => write!(f, "missing required field `{}`", name),
            CdpError::InvalidEnumValue { type_name, value } => {
                write!(f, "invalid value `{}` for enum {}", value, type_name)
            }
            CdpError::TypeMismatch { expected, found } => write!(f, "expected {}, found {}", expected, found),
        }
    }
}

impl std::error::Error for CdpError {}

/// Request descriptor handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub params: Option<JsonMap>,
}

impl Request {
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = JsonMap::new();
        json.insert("method".to_owned(), serde_json::Value::from(self.method));
        if let Some(params) = &self.params {
            json.insert("params".to_owned(), serde_json::Value::Object(params.clone()));
        }
        serde_json::Value::Object(json)
    }
}

/// A command waiting for its response. Resuming consumes it.
pub struct Command<T> {
    request: Request,
    decode: fn(&JsonMap) -> Result<T, CdpError>,
}

impl<T> Command<T> {
    pub fn new(
        method: &'static str,
        params: Option<JsonMap>,
        decode: fn(&JsonMap) -> Result<T, CdpError>,
    ) -> Self {
        Command {
            request: Request { method, params },
            decode,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn resume(self, response: &JsonMap) -> Result<T, CdpError> {
        (self.decode)(response)
    }
}

/// A notification payload routed by its wire method name.
pub trait Event: Sized {
    const METHOD: &'static str;

    fn from_json(json: &serde_json::Value) -> Result<Self, CdpError>;
}

pub fn required<'a>(json: &'a JsonMap, key: &'static str) -> Result<&'a serde_json::Value, CdpError> {
    json.get(key).ok_or(CdpError::MissingField(key))
}

/// `None` for a missing key or an explicit `null`.
pub fn optional<'a>(json: &'a JsonMap, key: &str) -> Option<&'a serde_json::Value> {
    json.get(key).filter(|v| !v.is_null())
}

/// Like [`optional`], but a present `null` is kept: it is a legal `any` value.
pub fn optional_any<'a>(json: &'a JsonMap, key: &str) -> Option<&'a serde_json::Value> {
    json.get(key)
}

fn mismatch(expected: &'static str, found: &serde_json::Value) -> CdpError {
    CdpError::TypeMismatch {
        expected,
        found: found.clone(),
    }
}

pub fn as_object(json: &serde_json::Value) -> Result<&JsonMap, CdpError> {
    json.as_object().ok_or_else(|| mismatch("object", json))
}

/// Notification payload; a missing (`null`) payload reads as an empty mapping.
pub fn event_params(json: &serde_json::Value) -> Result<std::borrow::Cow<'_, JsonMap>, CdpError> {
    match json {
        serde_json::Value::Null => Ok(std::borrow::Cow::Owned(JsonMap::new())),
        other => as_object(other).map(std::borrow::Cow::Borrowed),
    }
}

pub fn as_str<'a>(json: &'a serde_json::Value) -> Result<&'a str, CdpError> {
    json.as_str().ok_or_else(|| mismatch("string", json))
}

pub fn decode_boolean(json: &serde_json::Value) -> Result<bool, CdpError> {
    json.as_bool().ok_or_else(|| mismatch("boolean", json))
}

/// Integral floats are accepted inside the `i64` range.
pub fn decode_integer(json: &serde_json::Value) -> Result<i64, CdpError> {
    json.as_i64()
        .or_else(|| {
            json.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| mismatch("integer", json))
}

pub fn decode_number(json: &serde_json::Value) -> Result<f64, CdpError> {
    json.as_f64().ok_or_else(|| mismatch("number", json))
}

pub fn decode_string(json: &serde_json::Value) -> Result<String, CdpError> {
    as_str(json).map(str::to_owned)
}

pub fn decode_object(json: &serde_json::Value) -> Result<JsonMap, CdpError> {
    as_object(json).map(Clone::clone)
}

pub fn decode_any(json: &serde_json::Value) -> Result<serde_json::Value, CdpError> {
    Ok(json.clone())
}

pub fn decode_array<T>(
    json: &serde_json::Value,
    item: impl Fn(&serde_json::Value) -> Result<T, CdpError>,
) -> Result<Vec<T>, CdpError> {
    json.as_array()
        .ok_or_else(|| mismatch("array", json))?
        .iter()
        .map(item)
        .collect()
}
