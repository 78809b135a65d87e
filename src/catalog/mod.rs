//! Catalog Management Module
//!
//! This module holds the hierarchical catalog of tables, functions, procedures
//! and table-valued functions, and the operations that populate it.

pub mod catalog;
pub mod column;
pub mod definition;
pub mod error;
pub mod function;
pub mod namespace;
pub mod operations;
pub mod resource;
pub mod shared;
pub mod table;

// Re-export key types
pub use self::catalog::Catalog;
pub use self::column::Column;
pub use self::definition::{
    CatalogDefinitions, ColumnDefinition, FunctionDefinition, ProcedureDefinition,
    SignatureDefinition, TableDefinition, TvfDefinition,
};
pub use self::error::{CatalogError, ResourceKind, Result};
pub use self::function::{
    ArgumentType, Function, FunctionMode, FunctionSignature, Procedure, TableValuedFunction,
    TvfRelation, DEFAULT_FUNCTION_GROUP,
};
pub use self::namespace::Namespace;
pub use self::operations::{
    copy_catalog, create_function, create_procedure, create_table, create_tvf, delete_function,
    delete_function_by_full_name, delete_procedure, delete_table, delete_tvf, find, find_function, find_function_by_full_name,
    find_procedure, find_table, find_tvf, CatalogOperations, CreateMode, OperationsConfig,
};
pub use self::resource::CatalogResource;
pub use self::shared::SharedCatalog;
pub use self::table::Table;
