// Column Module
//
// This module defines the Column type describing one named, typed column of a
// table or of a table-valued function's output.

use serde::{Serialize, Deserialize};
use crate::types::Type;

/// Represents a column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Column type
    data_type: Type,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data_type: Type) -> Self {
        Column {
            name: name.into(),
            data_type,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the column type
    pub fn data_type(&self) -> &Type {
        &self.data_type
    }
}
