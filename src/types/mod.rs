//! Type Values Module
//!
//! This module defines the structured type values attached to columns, function
//! arguments and table-valued function outputs, plus the textual type grammar
//! parser that produces them.

pub mod parser;

pub use self::parser::{parse_type, TypeParseError, TypeParser};

use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

/// Simple (non-composite) type kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    String,
    Bytes,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    Float,
    Double,
    Numeric,
    BigNumeric,
    Date,
    Time,
    Datetime,
    Timestamp,
    Interval,
    Geography,
    Json,
}

// Upper-cased type names (canonical names and accepted aliases) to kinds
static TYPE_NAMES: Lazy<HashMap<&'static str, TypeKind>> = Lazy::new(|| {
    let mut names = HashMap::new();
    for kind in TypeKind::ALL {
        names.insert(kind.name(), kind);
    }

    names.insert("FLOAT64", TypeKind::Double);
    names.insert("FLOAT32", TypeKind::Float);
    names.insert("INT", TypeKind::Int64);
    names.insert("INTEGER", TypeKind::Int64);
    names.insert("SMALLINT", TypeKind::Int64);
    names.insert("BIGINT", TypeKind::Int64);
    names.insert("TINYINT", TypeKind::Int64);
    names.insert("BYTEINT", TypeKind::Int64);
    names.insert("BOOLEAN", TypeKind::Bool);
    names.insert("DECIMAL", TypeKind::Numeric);
    names.insert("BIGDECIMAL", TypeKind::BigNumeric);
    names
});

impl TypeKind {
    /// Every supported simple kind
    pub const ALL: [TypeKind; 18] = [
        TypeKind::String,
        TypeKind::Bytes,
        TypeKind::Int32,
        TypeKind::Int64,
        TypeKind::Uint32,
        TypeKind::Uint64,
        TypeKind::Bool,
        TypeKind::Float,
        TypeKind::Double,
        TypeKind::Numeric,
        TypeKind::BigNumeric,
        TypeKind::Date,
        TypeKind::Time,
        TypeKind::Datetime,
        TypeKind::Timestamp,
        TypeKind::Interval,
        TypeKind::Geography,
        TypeKind::Json,
    ];

    /// Look up a kind by name, ignoring case. Aliases such as `FLOAT64` are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        TYPE_NAMES.get(name.to_uppercase().as_str()).copied()
    }

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::String => "STRING",
            TypeKind::Bytes => "BYTES",
            TypeKind::Int32 => "INT32",
            TypeKind::Int64 => "INT64",
            TypeKind::Uint32 => "UINT32",
            TypeKind::Uint64 => "UINT64",
            TypeKind::Bool => "BOOL",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::Numeric => "NUMERIC",
            TypeKind::BigNumeric => "BIGNUMERIC",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Datetime => "DATETIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::Interval => "INTERVAL",
            TypeKind::Geography => "GEOGRAPHY",
            TypeKind::Json => "JSON",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub field_type: Type,
}

impl StructField {
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        StructField {
            name: name.into(),
            field_type,
        }
    }
}

/// A structured type value.
///
/// Types are immutable values compared structurally. Struct field order is
/// significant; parameters such as `NUMERIC(10, 2)` are not part of the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Simple(TypeKind),
    Array(Box<Type>),
    Struct(Vec<StructField>),
}

impl Type {
    pub fn simple(kind: TypeKind) -> Self {
        Type::Simple(kind)
    }

    pub fn array(element_type: Type) -> Self {
        Type::Array(Box::new(element_type))
    }

    pub fn struct_of(fields: Vec<StructField>) -> Self {
        Type::Struct(fields)
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Type::Simple(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    /// The kind of a simple type
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Type::Simple(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The element type of an array type
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The fields of a struct type, in declaration order
    pub fn fields(&self) -> &[StructField] {
        match self {
            Type::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Find a struct field by name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields()
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}

impl From<TypeKind> for Type {
    fn from(kind: TypeKind) -> Self {
        Type::Simple(kind)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Simple(kind) => write!(f, "{}", kind),
            Type::Array(element) => write!(f, "ARRAY<{}>", element),
            Type::Struct(fields) => {
                f.write_str("STRUCT<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", field.name, field.field_type)?;
                }
                f.write_str(">")
            }
        }
    }
}
