//! Abstract syntax tree for the protocol IDL.
//!
//! Every node is built once by the loader and only touched again by the patcher.
//! Cross-domain references are kept as strings; lookups happen at compile time.

/// Protocol version stamp, e.g. `{ major: "1", minor: "3" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: String,
    pub minor: String,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Root document: version and domains in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    pub version: Version,
    pub domains: Vec<Domain>,
}

impl Protocol {
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn domain_mut(&mut self, name: &str) -> Option<&mut Domain> {
        self.domains.iter_mut().find(|d| d.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Declared in the IDL but not authoritative; imports are computed.
    pub dependencies: Vec<String>,
    pub types: Vec<TypeDecl>,
    pub commands: Vec<Command>,
    pub events: Vec<Event>,
}

impl Domain {
    pub fn get_type(&self, id: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.id == id)
    }
}

/// Wire primitive kinds. `array` is not a primitive: it is expressed by [`Leaf::Repeated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Any,
}

impl PrimitiveKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Object => "object",
            PrimitiveKind::Any => "any",
        }
    }
}

/// Element shape of a repeated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Items {
    Primitive(PrimitiveKind),
    Reference(String),
}

impl Items {
    pub fn reference(&self) -> Option<&str> {
        match self {
            Items::Reference(r) => Some(r),
            Items::Primitive(_) => None,
        }
    }
}

/// Shape of a property: exactly one of primitive, reference or repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Primitive(PrimitiveKind),
    Reference(String),
    Repeated(Items),
}

impl Leaf {
    /// The referenced type, directly or as the element of a repeated value.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Leaf::Reference(r) => Some(r),
            Leaf::Repeated(items) => items.reference(),
            Leaf::Primitive(_) => None,
        }
    }
}

/// A named field of a record, a command parameter/return or an event payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub description: Option<String>,
    pub leaf: Leaf,
    /// Inline enumeration on a string property (kept as a string).
    pub enum_values: Option<Vec<String>>,
    pub optional: bool,
    pub experimental: bool,
    pub deprecated: bool,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub id: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    pub body: TypeBody,
    pub domain: String,
}

/// The three mutually exclusive shapes of a top-level type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeBody {
    Enum(Vec<String>),
    Record(Vec<Property>),
    Alias(AliasTarget),
}

/// What a primitive alias wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    Primitive(PrimitiveKind),
    Repeated(Items),
}

impl TypeDecl {
    /// All references this type mentions (record fields or repeated alias items).
    pub fn references(&self) -> Vec<&str> {
        match &self.body {
            TypeBody::Enum(_) => Vec::new(),
            TypeBody::Record(props) => props.iter().filter_map(|p| p.leaf.reference()).collect(),
            TypeBody::Alias(AliasTarget::Repeated(items)) => items.reference().into_iter().collect(),
            TypeBody::Alias(AliasTarget::Primitive(_)) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    pub parameters: Vec<Property>,
    pub returns: Vec<Property>,
    pub domain: String,
}

impl Command {
    pub fn references(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .chain(&self.returns)
            .filter_map(|p| p.leaf.reference())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    pub parameters: Vec<Property>,
    pub domain: String,
}

impl Event {
    pub fn references(&self) -> Vec<&str> {
        self.parameters.iter().filter_map(|p| p.leaf.reference()).collect()
    }
}
