// Resource Definitions Module
//
// Serializable descriptions of catalog resources whose types are written as
// type expression strings. External loaders deserialize these and hand them
// to `CatalogOperations::apply_definitions`.

use log::info;
use serde::{Serialize, Deserialize};

use super::catalog::Catalog;
use super::column::Column;
use super::error::Result;
use super::function::{
    ArgumentType, Function, FunctionMode, FunctionSignature, Procedure, TableValuedFunction,
    TvfRelation, DEFAULT_FUNCTION_GROUP,
};
use super::operations::{CatalogOperations, CreateMode};
use super::table::Table;
use crate::types::parse_type;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Full dotted name
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureDefinition {
    #[serde(default)]
    pub arguments: Vec<String>,
    pub returns: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub mode: FunctionMode,
    pub signatures: Vec<SignatureDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDefinition {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvfDefinition {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    pub output_columns: Vec<ColumnDefinition>,
}

/// A batch of resource definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDefinitions {
    pub tables: Vec<TableDefinition>,
    pub functions: Vec<FunctionDefinition>,
    pub procedures: Vec<ProcedureDefinition>,
    pub table_valued_functions: Vec<TvfDefinition>,
}

fn default_group() -> String {
    DEFAULT_FUNCTION_GROUP.to_string()
}

fn split_name(name: &str) -> Vec<String> {
    name.split('.').map(|s| s.to_string()).collect()
}

/// Parse a signature argument or result. `TABLE`, `VOID` and `ANY TYPE` name
/// the non-value argument kinds; anything else is a type expression.
pub fn parse_argument_type(input: &str) -> Result<ArgumentType> {
    let trimmed = input.trim();
    let normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    match normalized.as_str() {
        "TABLE" => Ok(ArgumentType::Relation),
        "VOID" => Ok(ArgumentType::Void),
        "ANY TYPE" => Ok(ArgumentType::Any),
        _ => Ok(ArgumentType::Fixed(parse_type(trimmed)?)),
    }
}

fn parse_arguments(arguments: &[String]) -> Result<Vec<ArgumentType>> {
    arguments.iter().map(|arg| parse_argument_type(arg)).collect()
}

fn parse_columns(columns: &[ColumnDefinition]) -> Result<Vec<Column>> {
    columns
        .iter()
        .map(|col| -> Result<Column> { Ok(Column::new(col.name.clone(), parse_type(&col.data_type)?)) })
        .collect()
}

impl TableDefinition {
    pub fn to_table(&self) -> Result<Table> {
        let short_name = self.name.rsplit('.').next().unwrap_or(&self.name);
        Ok(Table::new(short_name, parse_columns(&self.columns)?).with_full_name(self.name.clone()))
    }
}

impl SignatureDefinition {
    pub fn to_signature(&self) -> Result<FunctionSignature> {
        Ok(FunctionSignature::new(
            parse_arguments(&self.arguments)?,
            parse_argument_type(&self.returns)?,
        ))
    }
}

impl FunctionDefinition {
    pub fn to_function(&self) -> Result<Function> {
        let signatures = self
            .signatures
            .iter()
            .map(|s| s.to_signature())
            .collect::<Result<Vec<_>>>()?;
        Ok(Function::new(split_name(&self.name), self.group.clone(), self.mode, signatures))
    }
}

impl ProcedureDefinition {
    pub fn to_procedure(&self) -> Result<Procedure> {
        let signature = FunctionSignature::new(parse_arguments(&self.arguments)?, ArgumentType::Void);
        Ok(Procedure::new(split_name(&self.name), signature))
    }
}

impl TvfDefinition {
    pub fn to_tvf(&self) -> Result<TableValuedFunction> {
        let signature = FunctionSignature::new(parse_arguments(&self.arguments)?, ArgumentType::Relation);
        let output = TvfRelation::from_columns(parse_columns(&self.output_columns)?);
        Ok(TableValuedFunction::new(split_name(&self.name), signature, output))
    }
}

impl CatalogOperations {
    /// Create every defined resource in `catalog` with the given mode.
    ///
    /// All type strings are parsed before anything is created, and the creates
    /// run against a copy that replaces `catalog` only when every one of them
    /// succeeded. On error `catalog` is left untouched.
    pub fn apply_definitions(
        &self,
        catalog: &mut Catalog,
        definitions: &CatalogDefinitions,
        mode: CreateMode,
    ) -> Result<()> {
        let tables = definitions
            .tables
            .iter()
            .map(|d| -> Result<_> { Ok((d.name.as_str(), d.to_table()?)) })
            .collect::<Result<Vec<_>>>()?;
        let functions = definitions
            .functions
            .iter()
            .map(|d| -> Result<_> { Ok((d.name.as_str(), d.to_function()?)) })
            .collect::<Result<Vec<_>>>()?;
        let procedures = definitions
            .procedures
            .iter()
            .map(|d| -> Result<_> { Ok((d.name.as_str(), d.to_procedure()?)) })
            .collect::<Result<Vec<_>>>()?;
        let tvfs = definitions
            .table_valued_functions
            .iter()
            .map(|d| -> Result<_> { Ok((d.name.as_str(), d.to_tvf()?)) })
            .collect::<Result<Vec<_>>>()?;

        let mut staged = catalog.clone();
        for (name, table) in tables {
            self.create_table(&mut staged, name, table, mode)?;
        }
        for (name, function) in functions {
            self.create_function(&mut staged, name, function, mode)?;
        }
        for (name, procedure) in procedures {
            self.create_procedure(&mut staged, name, procedure, mode)?;
        }
        for (name, tvf) in tvfs {
            self.create_tvf(&mut staged, name, tvf, mode)?;
        }
        *catalog = staged;

        info!(
            "Applied {} table(s), {} function(s), {} procedure(s), {} TVF(s) to catalog '{}'",
            definitions.tables.len(),
            definitions.functions.len(),
            definitions.procedures.len(),
            definitions.table_valued_functions.len(),
            catalog.name()
        );
        Ok(())
    }
}
