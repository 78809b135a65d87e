// Catalog Resource Accessors
//
// Ties each resource kind to its namespace on a catalog node, so that lookup,
// create and delete can be written once for all four kinds.

use std::fmt;
use std::sync::Arc;

use super::catalog::Catalog;
use super::error::{CatalogError, ResourceKind, Result};
use super::function::{qualify_function_name, Function, Procedure, TableValuedFunction};
use super::namespace::{normalize_name, Namespace};
use super::table::Table;

/// A resource kind stored in one of a catalog node's namespaces
pub trait CatalogResource: fmt::Debug + Send + Sync + Sized + 'static {
    const KIND: ResourceKind;

    fn namespace(catalog: &Catalog) -> &Namespace<Self>;

    fn namespace_mut(catalog: &mut Catalog) -> &mut Namespace<Self>;

    /// Name the resource registers under when added to a node directly
    fn default_name(&self) -> String;

    /// Reject a resource whose identity could not be stored or looked up
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Key this resource is stored under when registered as `name`
    fn storage_key(&self, name: &str) -> String {
        name.to_string()
    }

    /// Keys in `namespace` that a lookup of the plain `name` matches
    fn keys_named(namespace: &Namespace<Self>, name: &str) -> Vec<String> {
        if namespace.contains(name) {
            vec![normalize_name(name)]
        } else {
            Vec::new()
        }
    }

    /// First resource a lookup of the plain `name` matches
    fn find_named(namespace: &Namespace<Self>, name: &str) -> Option<Arc<Self>> {
        Self::keys_named(namespace, name)
            .first()
            .and_then(|key| namespace.get(key))
            .cloned()
    }
}

impl CatalogResource for Table {
    const KIND: ResourceKind = ResourceKind::Table;

    fn namespace(catalog: &Catalog) -> &Namespace<Self> {
        catalog.tables()
    }

    fn namespace_mut(catalog: &mut Catalog) -> &mut Namespace<Self> {
        &mut catalog.tables
    }

    fn default_name(&self) -> String {
        self.name().to_string()
    }
}

impl CatalogResource for Function {
    const KIND: ResourceKind = ResourceKind::Function;

    fn namespace(catalog: &Catalog) -> &Namespace<Self> {
        catalog.functions()
    }

    fn namespace_mut(catalog: &mut Catalog) -> &mut Namespace<Self> {
        &mut catalog.functions
    }

    fn default_name(&self) -> String {
        self.name()
    }

    // The group becomes the prefix of the `group:name` key
    fn validate(&self) -> Result<()> {
        let group = self.group();
        if group.trim().is_empty() || group.contains(':') {
            return Err(CatalogError::InvalidName(group.to_string()));
        }
        Ok(())
    }

    fn storage_key(&self, name: &str) -> String {
        qualify_function_name(self.group(), name)
    }

    // Every group's function registered under the name
    fn keys_named(namespace: &Namespace<Self>, name: &str) -> Vec<String> {
        let name = normalize_name(name);
        namespace
            .keys()
            .filter(|key| key.split_once(':').map(|(_, n)| n) == Some(name.as_str()))
            .map(|key| key.to_string())
            .collect()
    }
}

impl CatalogResource for Procedure {
    const KIND: ResourceKind = ResourceKind::Procedure;

    fn namespace(catalog: &Catalog) -> &Namespace<Self> {
        catalog.procedures()
    }

    fn namespace_mut(catalog: &mut Catalog) -> &mut Namespace<Self> {
        &mut catalog.procedures
    }

    fn default_name(&self) -> String {
        self.name()
    }
}

impl CatalogResource for TableValuedFunction {
    const KIND: ResourceKind = ResourceKind::TableValuedFunction;

    fn namespace(catalog: &Catalog) -> &Namespace<Self> {
        catalog.table_valued_functions()
    }

    fn namespace_mut(catalog: &mut Catalog) -> &mut Namespace<Self> {
        &mut catalog.table_valued_functions
    }

    fn default_name(&self) -> String {
        self.name()
    }
}
