use std::fmt;
use thiserror::Error;

use crate::types::TypeParseError;

/// Kinds of resources held by a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Table,
    Function,
    Procedure,
    TableValuedFunction,
    Catalog,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Table => "Table",
            ResourceKind::Function => "Function",
            ResourceKind::Procedure => "Procedure",
            ResourceKind::TableValuedFunction => "Table-valued function",
            ResourceKind::Catalog => "Catalog",
        };
        f.write_str(name)
    }
}

/// Errors raised by catalog lookups and operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A create under `CreateMode::CreateDefault` hit an existing resource
    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: ResourceKind, name: String },
    /// Path resolution failed, either at a sub-catalog or at the resource itself
    #[error("{kind} not found: {path}")]
    NotFound { kind: ResourceKind, path: String },
    /// Empty names or empty path segments
    #[error("Invalid resource name: '{0}'")]
    InvalidName(String),
    /// A type string in a resource definition did not parse
    #[error("Type error: {0}")]
    TypeParse(#[from] TypeParseError),
}

impl CatalogError {
    pub fn already_exists(kind: ResourceKind, name: impl Into<String>) -> Self {
        CatalogError::AlreadyExists { kind, name: name.into() }
    }

    pub fn not_found(kind: ResourceKind, path: impl Into<String>) -> Self {
        CatalogError::NotFound { kind, path: path.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, CatalogError::AlreadyExists { .. })
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
