//! Table Module
//!
//! This module defines the Table type that describes a table's schema.

use super::column::Column;
use serde::{Serialize, Deserialize};

/// Represents a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    name: String,
    /// Fully qualified name, e.g. `project.dataset.table`
    full_name: String,
    /// Columns in the table, in declaration order
    columns: Vec<Column>,
}

impl Table {
    /// Create a new table with the given name and columns. The full name
    /// defaults to the name.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let name = name.into();
        Table {
            full_name: name.clone(),
            name,
            columns,
        }
    }

    /// Set the fully qualified name
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the fully qualified table name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get the number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Get a column by position
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get a column by name (case-insensitive)
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get the position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.name().eq_ignore_ascii_case(name))
    }

    /// Get a string representation of the table schema
    pub fn schema_string(&self) -> String {
        let mut schema = format!("CREATE TABLE {} (\n", self.full_name);

        for (i, col) in self.columns.iter().enumerate() {
            schema.push_str(&format!("  {} {}", col.name(), col.data_type()));
            if i < self.columns.len() - 1 {
                schema.push_str(",\n");
            }
        }

        schema.push_str("\n);");
        schema
    }
}
