// Routine Definitions Module
//
// This module defines functions, procedures and table-valued functions, and the
// signatures they carry.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::column::Column;
use crate::types::Type;

/// Group assigned to user-defined functions when none is given
pub const DEFAULT_FUNCTION_GROUP: &str = "UDF";

/// How a function is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FunctionMode {
    #[default]
    Scalar,
    Aggregate,
    Analytic,
}

/// Type of a signature argument or result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentType {
    /// A value of a concrete type
    Fixed(Type),
    /// A table
    Relation,
    /// No value, as in a procedure result
    Void,
    /// A value of any type
    Any,
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentType::Fixed(t) => write!(f, "{}", t),
            ArgumentType::Relation => f.write_str("TABLE"),
            ArgumentType::Void => f.write_str("VOID"),
            ArgumentType::Any => f.write_str("ANY TYPE"),
        }
    }
}

/// Ordered argument types plus a result type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    arguments: Vec<ArgumentType>,
    result: ArgumentType,
}

impl FunctionSignature {
    pub fn new(arguments: Vec<ArgumentType>, result: ArgumentType) -> Self {
        FunctionSignature { arguments, result }
    }

    pub fn arguments(&self) -> &[ArgumentType] {
        &self.arguments
    }

    pub fn result(&self) -> &ArgumentType {
        &self.result
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ") -> {}", self.result)
    }
}

/// A scalar, aggregate or analytic function.
///
/// Functions are identified by their group and name path together; two
/// functions sharing a name path but not a group are different functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    name_path: Vec<String>,
    group: String,
    mode: FunctionMode,
    signatures: Vec<FunctionSignature>,
}

impl Function {
    pub fn new(
        name_path: Vec<String>,
        group: impl Into<String>,
        mode: FunctionMode,
        signatures: Vec<FunctionSignature>,
    ) -> Self {
        Function {
            name_path,
            group: group.into(),
            mode,
            signatures,
        }
    }

    pub fn name_path(&self) -> &[String] {
        &self.name_path
    }

    /// Dotted name, e.g. `project.dataset.fn`
    pub fn name(&self) -> String {
        self.name_path.join(".")
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Group-qualified name, e.g. `UDF:project.dataset.fn`
    pub fn full_name(&self) -> String {
        qualify_function_name(&self.group, &self.name())
    }

    pub fn mode(&self) -> FunctionMode {
        self.mode
    }

    pub fn signatures(&self) -> &[FunctionSignature] {
        &self.signatures
    }
}

/// Build the `group:name` key functions are stored under
pub fn qualify_function_name(group: &str, name: &str) -> String {
    format!("{}:{}", group, name)
}

/// A stored procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    name_path: Vec<String>,
    signature: FunctionSignature,
}

impl Procedure {
    pub fn new(name_path: Vec<String>, signature: FunctionSignature) -> Self {
        Procedure { name_path, signature }
    }

    pub fn name_path(&self) -> &[String] {
        &self.name_path
    }

    pub fn name(&self) -> String {
        self.name_path.join(".")
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// Output schema of a table-valued function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvfRelation {
    columns: Vec<Column>,
    value_table: bool,
}

impl TvfRelation {
    /// A relation with named columns
    pub fn from_columns(columns: Vec<Column>) -> Self {
        TvfRelation {
            columns,
            value_table: false,
        }
    }

    /// A value table: a single anonymous column of the given type
    pub fn value_table(row_type: Type) -> Self {
        TvfRelation {
            columns: vec![Column::new("", row_type)],
            value_table: true,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_value_table(&self) -> bool {
        self.value_table
    }
}

/// A function whose result is a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableValuedFunction {
    name_path: Vec<String>,
    signature: FunctionSignature,
    output_schema: TvfRelation,
}

impl TableValuedFunction {
    pub fn new(name_path: Vec<String>, signature: FunctionSignature, output_schema: TvfRelation) -> Self {
        TableValuedFunction {
            name_path,
            signature,
            output_schema,
        }
    }

    pub fn name_path(&self) -> &[String] {
        &self.name_path
    }

    pub fn name(&self) -> String {
        self.name_path.join(".")
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn output_schema(&self) -> &TvfRelation {
        &self.output_schema
    }
}
