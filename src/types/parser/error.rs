use thiserror::Error;

/// Error raised for a malformed type expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse type: {message} at position {position} near '{near}'")]
pub struct TypeParseError {
    /// What went wrong
    pub message: String,
    /// The offending token, or the remaining unparsed input
    pub near: String,
    /// Byte offset into the input
    pub position: usize,
}

impl TypeParseError {
    pub(crate) fn new(message: impl Into<String>, near: impl Into<String>, position: usize) -> Self {
        TypeParseError {
            message: message.into(),
            near: near.into(),
            position,
        }
    }
}

/// Result type for type parsing
pub type ParseResult<T> = Result<T, TypeParseError>;
