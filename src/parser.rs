//! Load the JSON protocol document into the AST.
//!
//! The raw document is deserialized with serde, then every node is converted
//! into the closed AST shapes, rejecting leaves that declare more than one (or
//! none) of `type`, `$ref` and `items`.

use crate::ast::*;
use crate::error::CompileError;
use serde::Deserialize;
use std::collections::HashSet;

/// The only protocol version this compiler understands.
pub const SUPPORTED_VERSION: (&str, &str) = ("1", "3");

#[derive(Deserialize)]
struct RawDocument {
    version: RawVersion,
    #[serde(default)]
    domains: Vec<RawDomain>,
}

#[derive(Deserialize)]
struct RawVersion {
    major: String,
    minor: String,
}

#[derive(Deserialize)]
struct RawDomain {
    domain: String,
    description: Option<String>,
    #[serde(default)]
    experimental: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    types: Vec<RawType>,
    #[serde(default)]
    commands: Vec<RawCommand>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
    Any,
}

impl RawKind {
    fn primitive(self) -> Option<PrimitiveKind> {
        match self {
            RawKind::Boolean => Some(PrimitiveKind::Boolean),
            RawKind::Integer => Some(PrimitiveKind::Integer),
            RawKind::Number => Some(PrimitiveKind::Number),
            RawKind::String => Some(PrimitiveKind::String),
            RawKind::Object => Some(PrimitiveKind::Object),
            RawKind::Any => Some(PrimitiveKind::Any),
            RawKind::Array => None,
        }
    }
}

#[derive(Deserialize)]
struct RawItems {
    #[serde(rename = "type")]
    kind: Option<RawKind>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
}

#[derive(Deserialize)]
struct RawType {
    id: String,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: RawKind,
    items: Option<RawItems>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<String>>,
    #[serde(default)]
    properties: Vec<RawProperty>,
    #[serde(default)]
    experimental: bool,
    #[serde(default)]
    deprecated: bool,
}

#[derive(Deserialize)]
struct RawProperty {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<RawKind>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<String>>,
    items: Option<RawItems>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    experimental: bool,
    #[serde(default)]
    deprecated: bool,
}

#[derive(Deserialize)]
struct RawCommand {
    name: String,
    description: Option<String>,
    #[serde(default)]
    experimental: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    parameters: Vec<RawProperty>,
    #[serde(default)]
    returns: Vec<RawProperty>,
}

#[derive(Deserialize)]
struct RawEvent {
    name: String,
    description: Option<String>,
    #[serde(default)]
    experimental: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    parameters: Vec<RawProperty>,
}

/// Parse one protocol document. Fails fast on a version other than 1.3.
pub fn parse(source: &str) -> Result<Protocol, CompileError> {
    let raw: RawDocument = serde_json::from_str(source)?;
    build_protocol(raw)
}

/// Parse an already decoded JSON document.
pub fn parse_value(value: serde_json::Value) -> Result<Protocol, CompileError> {
    let raw: RawDocument = serde_json::from_value(value)?;
    build_protocol(raw)
}

/// Merge several documents (browser + JS protocol) into one, domains sorted by name.
pub fn merge(protocols: Vec<Protocol>) -> Option<Protocol> {
    let mut iter = protocols.into_iter();
    let mut merged = iter.next()?;
    for p in iter {
        merged.domains.extend(p.domains);
    }
    merged.domains.sort_by(|a, b| a.name.cmp(&b.name));
    Some(merged)
}

fn build_protocol(raw: RawDocument) -> Result<Protocol, CompileError> {
    let RawVersion { major, minor } = raw.version;
    if (major.as_str(), minor.as_str()) != SUPPORTED_VERSION {
        return Err(CompileError::SchemaVersionMismatch { major, minor });
    }
    let domains = raw
        .domains
        .into_iter()
        .map(build_domain)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Protocol {
        version: Version { major, minor },
        domains,
    })
}

fn build_domain(raw: RawDomain) -> Result<Domain, CompileError> {
    let name = raw.domain;
    let mut seen = HashSet::new();
    let mut types = Vec::with_capacity(raw.types.len());
    for t in raw.types {
        if !seen.insert(t.id.clone()) {
            return Err(CompileError::DuplicateDeclaration {
                domain: name.clone(),
                name: t.id,
            });
        }
        types.push(build_type(t, &name)?);
    }
    let commands = raw
        .commands
        .into_iter()
        .map(|c| build_command(c, &name))
        .collect::<Result<Vec<_>, _>>()?;
    let events = raw
        .events
        .into_iter()
        .map(|e| build_event(e, &name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Domain {
        name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        dependencies: raw.dependencies,
        types,
        commands,
        events,
    })
}

fn build_type(raw: RawType, domain: &str) -> Result<TypeDecl, CompileError> {
    let location = format!("{}.{}", domain, raw.id);
    let enum_values = raw.enum_values.filter(|v| !v.is_empty());
    let body = match (enum_values, raw.properties.is_empty()) {
        (Some(_), false) => return Err(CompileError::AmbiguousReferenceShape { location }),
        (Some(values), true) => TypeBody::Enum(values),
        (None, false) => TypeBody::Record(
            raw.properties
                .into_iter()
                .map(|p| build_property(p, domain, &location))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        (None, true) => match (raw.kind.primitive(), raw.items) {
            (Some(kind), None) => TypeBody::Alias(AliasTarget::Primitive(kind)),
            (None, Some(items)) => TypeBody::Alias(AliasTarget::Repeated(build_items(items, &location)?)),
            (None, None) => {
                return Err(CompileError::InvalidShape {
                    location,
                    reason: "array type without items",
                })
            }
            (Some(_), Some(_)) => return Err(CompileError::AmbiguousReferenceShape { location }),
        },
    };
    Ok(TypeDecl {
        id: raw.id,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        body,
        domain: domain.to_string(),
    })
}

fn build_items(raw: RawItems, location: &str) -> Result<Items, CompileError> {
    match (raw.kind, raw.reference) {
        (Some(_), Some(_)) => Err(CompileError::AmbiguousReferenceShape {
            location: location.to_string(),
        }),
        (None, Some(r)) => Ok(Items::Reference(r)),
        (Some(kind), None) => kind.primitive().map(Items::Primitive).ok_or_else(|| {
            CompileError::InvalidShape {
                location: location.to_string(),
                reason: "nested arrays are not supported",
            }
        }),
        (None, None) => Err(CompileError::InvalidShape {
            location: location.to_string(),
            reason: "items declare neither type nor $ref",
        }),
    }
}

fn build_leaf(
    kind: Option<RawKind>,
    reference: Option<String>,
    items: Option<RawItems>,
    location: &str,
) -> Result<Leaf, CompileError> {
    let ambiguous = || CompileError::AmbiguousReferenceShape {
        location: location.to_string(),
    };
    match (kind, reference, items) {
        (kind, None, Some(items)) if kind.is_none() || kind == Some(RawKind::Array) => {
            Ok(Leaf::Repeated(build_items(items, location)?))
        }
        (None, Some(r), None) => Ok(Leaf::Reference(r)),
        (Some(RawKind::Array), None, None) => Err(CompileError::InvalidShape {
            location: location.to_string(),
            reason: "array without items",
        }),
        (Some(k), None, None) => k.primitive().map(Leaf::Primitive).ok_or_else(ambiguous),
        (None, None, None) => Err(CompileError::InvalidShape {
            location: location.to_string(),
            reason: "declares neither type, $ref nor items",
        }),
        _ => Err(ambiguous()),
    }
}

fn build_property(raw: RawProperty, domain: &str, owner: &str) -> Result<Property, CompileError> {
    let location = format!("{}.{}", owner, raw.name);
    let leaf = build_leaf(raw.kind, raw.reference, raw.items, &location)?;
    Ok(Property {
        name: raw.name,
        description: raw.description,
        leaf,
        enum_values: raw.enum_values,
        optional: raw.optional,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        domain: domain.to_string(),
    })
}

fn build_command(raw: RawCommand, domain: &str) -> Result<Command, CompileError> {
    let owner = format!("{}.{}", domain, raw.name);
    let parameters = raw
        .parameters
        .into_iter()
        .map(|p| build_property(p, domain, &owner))
        .collect::<Result<Vec<_>, _>>()?;
    let returns = raw
        .returns
        .into_iter()
        .map(|p| build_property(p, domain, &owner))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command {
        name: raw.name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        parameters,
        returns,
        domain: domain.to_string(),
    })
}

fn build_event(raw: RawEvent, domain: &str) -> Result<Event, CompileError> {
    let owner = format!("{}.{}", domain, raw.name);
    let parameters = raw
        .parameters
        .into_iter()
        .map(|p| build_property(p, domain, &owner))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Event {
        name: raw.name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        parameters,
        domain: domain.to_string(),
    })
}
