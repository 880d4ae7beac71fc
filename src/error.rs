//! Load- and compile-time errors.

/// Fatal conditions raised while loading or compiling a schema.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("unsupported protocol version {major}.{minor} (expected 1.3)")]
    SchemaVersionMismatch { major: String, minor: String },
    #[error("{location}: more than one of type, $ref and items declared")]
    AmbiguousReferenceShape { location: String },
    #[error("{location}: {reason}")]
    InvalidShape { location: String, reason: &'static str },
    #[error("{location}: enum values `{first}` and `{second}` both map to `{constant}`")]
    EnumNameCollision {
        location: String,
        constant: String,
        first: String,
        second: String,
    },
    #[error("domain {domain}: duplicate declaration `{name}`")]
    DuplicateDeclaration { domain: String, name: String },
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
