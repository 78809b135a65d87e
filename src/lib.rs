// Catalog Toolkit
//
// In-memory catalog of SQL schema resources and a parser for textual type
// expressions, used to feed a semantic analyzer.

pub mod catalog;
pub mod types;

// Re-export key items for convenient access
pub use catalog::{Catalog, CatalogError, CatalogOperations, CreateMode, SharedCatalog};
pub use types::{parse_type, Type, TypeKind, TypeParseError};
