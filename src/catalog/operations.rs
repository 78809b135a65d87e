//! Catalog Operations
//!
//! Create, delete, lookup and copy over a catalog tree. One generic routine per
//! operation serves all four resource kinds through [`CatalogResource`].
//!
//! A dotted name such as `project.dataset.table` is registered both verbatim
//! (`["project.dataset.table"]`) and under each nested split
//! (`["project", "dataset.table"]`, `["project", "dataset", "table"]`), creating
//! sub-catalogs as needed, so references resolve whichever way they are written.
//!
//! None of these operations lock anything. Callers mutating one catalog from
//! several threads must hold an exclusive lock for the whole operation, for
//! instance through [`SharedCatalog`](super::SharedCatalog).

use std::sync::Arc;
use log::debug;
use serde::{Serialize, Deserialize};

use super::catalog::Catalog;
use super::error::{CatalogError, Result};
use super::function::{qualify_function_name, Function, Procedure, TableValuedFunction};
use super::namespace::{normalize_name, Namespace};
use super::resource::CatalogResource;
use super::table::Table;

/// How a create resolves a name that is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreateMode {
    /// Fail with `AlreadyExists`
    #[default]
    CreateDefault,
    /// Replace the existing resource
    CreateOrReplace,
    /// Keep the existing resource and succeed
    CreateIfNotExists,
}

/// Configuration for catalog operations
#[derive(Debug, Clone)]
pub struct OperationsConfig {
    /// Also register dotted names under nested sub-catalogs
    pub register_nested_paths: bool,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            register_nested_paths: true,
        }
    }
}

/// One place a resource is registered: a chain of sub-catalogs and the name
/// within the last of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub catalogs: Vec<String>,
    pub name: String,
}

/// Split `name` into the paths it is registered under
pub fn registration_paths(name: &str, register_nested: bool) -> Result<Vec<ResourcePath>> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|segment| segment.trim().is_empty()) {
        return Err(CatalogError::InvalidName(name.to_string()));
    }

    let mut paths = vec![ResourcePath {
        catalogs: Vec::new(),
        name: name.to_string(),
    }];

    if register_nested {
        for split in 1..segments.len() {
            paths.push(ResourcePath {
                catalogs: segments[..split].iter().map(|s| s.to_string()).collect(),
                name: segments[split..].join("."),
            });
        }
    }

    Ok(paths)
}

/// Resolve a qualified path: every segment but the last names a sub-catalog,
/// the last names the resource.
pub fn find<R: CatalogResource, S: AsRef<str>>(catalog: &Catalog, path: &[S]) -> Result<Arc<R>> {
    let not_found = || {
        let joined: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
        CatalogError::not_found(R::KIND, joined.join("."))
    };

    let (name, parents) = path.split_last().ok_or_else(not_found)?;
    let node = catalog.descend(parents).ok_or_else(not_found)?;
    R::find_named(R::namespace(node), name.as_ref()).ok_or_else(not_found)
}

/// Executes create and delete operations against a catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogOperations {
    config: OperationsConfig,
}

impl CatalogOperations {
    pub fn new(config: OperationsConfig) -> Self {
        CatalogOperations { config }
    }

    pub fn config(&self) -> &OperationsConfig {
        &self.config
    }

    /// Create `resource` under `name`.
    ///
    /// Returns the stored resource. Under `CreateIfNotExists` with a
    /// conflicting resource present this is the existing instance, not
    /// `resource`. The catalog is only mutated once every conflict check passed.
    pub fn create<R: CatalogResource>(
        &self,
        catalog: &mut Catalog,
        name: &str,
        resource: R,
        mode: CreateMode,
    ) -> Result<Arc<R>> {
        let paths = registration_paths(name, self.config.register_nested_paths)?;
        resource.validate()?;

        let existing = paths.iter().find_map(|path| {
            catalog
                .descend(&path.catalogs)
                .and_then(|node| R::namespace(node).get(&resource.storage_key(&path.name)))
                .cloned()
        });

        if let Some(existing) = existing {
            match mode {
                CreateMode::CreateDefault => {
                    return Err(CatalogError::already_exists(R::KIND, name));
                }
                CreateMode::CreateIfNotExists => {
                    debug!("{} '{}' already exists, keeping existing definition", R::KIND, name);
                    return Ok(existing);
                }
                CreateMode::CreateOrReplace => {
                    debug!("Replacing {} '{}'", R::KIND, name);
                    for path in &paths {
                        if let Some(node) = catalog.descend_mut(&path.catalogs) {
                            R::namespace_mut(node).remove(&resource.storage_key(&path.name));
                        }
                    }
                }
            }
        }

        let resource = Arc::new(resource);
        for path in &paths {
            let node = catalog.descend_or_create(&path.catalogs);
            R::namespace_mut(node).insert(&resource.storage_key(&path.name), Arc::clone(&resource));
        }

        debug!("Created {} '{}' in catalog '{}' under {} path(s)", R::KIND, name, catalog.name(), paths.len());
        Ok(resource)
    }

    /// Delete the resource registered as `name` from every path it was
    /// registered under.
    ///
    /// Fails with `NotFound` if nothing was registered. Sub-catalogs that a
    /// dotted create made on demand are removed again once the delete leaves
    /// them empty; sub-catalogs added by the caller are kept.
    pub fn delete<R: CatalogResource>(&self, catalog: &mut Catalog, name: &str) -> Result<()> {
        self.delete_matching::<R, _>(catalog, name, name, R::keys_named)
    }

    // Removes, on every registration path of `name`, the keys `keys` selects
    fn delete_matching<R, F>(&self, catalog: &mut Catalog, identity: &str, name: &str, keys: F) -> Result<()>
    where
        R: CatalogResource,
        F: Fn(&Namespace<R>, &str) -> Vec<String>,
    {
        let paths = registration_paths(name, self.config.register_nested_paths)?;

        let mut removed = 0;
        for path in &paths {
            if let Some(node) = catalog.descend_mut(&path.catalogs) {
                let matched = keys(R::namespace(node), &path.name);
                let namespace = R::namespace_mut(node);
                removed += matched.iter().filter_map(|key| namespace.remove(key)).count();
            }
        }

        if removed == 0 {
            return Err(CatalogError::not_found(R::KIND, identity));
        }

        let pruned: usize = paths.iter().rev().map(|path| catalog.prune_implicit(&path.catalogs)).sum();

        debug!(
            "Deleted {} '{}' ({} registration(s), {} empty sub-catalog(s) pruned)",
            R::KIND, identity, removed, pruned
        );
        Ok(())
    }

    pub fn create_table(&self, catalog: &mut Catalog, name: &str, table: Table, mode: CreateMode) -> Result<Arc<Table>> {
        self.create(catalog, name, table, mode)
    }

    pub fn create_function(
        &self,
        catalog: &mut Catalog,
        name: &str,
        function: Function,
        mode: CreateMode,
    ) -> Result<Arc<Function>> {
        self.create(catalog, name, function, mode)
    }

    pub fn create_procedure(
        &self,
        catalog: &mut Catalog,
        name: &str,
        procedure: Procedure,
        mode: CreateMode,
    ) -> Result<Arc<Procedure>> {
        self.create(catalog, name, procedure, mode)
    }

    pub fn create_tvf(
        &self,
        catalog: &mut Catalog,
        name: &str,
        tvf: TableValuedFunction,
        mode: CreateMode,
    ) -> Result<Arc<TableValuedFunction>> {
        self.create(catalog, name, tvf, mode)
    }

    pub fn delete_table(&self, catalog: &mut Catalog, name: &str) -> Result<()> {
        self.delete::<Table>(catalog, name)
    }

    /// Deletes the functions of every group registered under `name`, or only
    /// the one group's when `name` is written `group:name`
    pub fn delete_function(&self, catalog: &mut Catalog, name: &str) -> Result<()> {
        if name.contains(':') {
            return self.delete_function_by_full_name(catalog, name);
        }
        self.delete::<Function>(catalog, name)
    }

    /// Deletes the function of one group, addressed by its `group:name` key.
    /// Functions of the same name in other groups are kept.
    pub fn delete_function_by_full_name(&self, catalog: &mut Catalog, full_name: &str) -> Result<()> {
        let (group, name) = full_name
            .split_once(':')
            .ok_or_else(|| CatalogError::InvalidName(full_name.to_string()))?;

        self.delete_matching::<Function, _>(catalog, full_name, name, |namespace, name| {
            let key = normalize_name(&qualify_function_name(group, name));
            if namespace.contains(&key) {
                vec![key]
            } else {
                Vec::new()
            }
        })
    }

    pub fn delete_procedure(&self, catalog: &mut Catalog, name: &str) -> Result<()> {
        self.delete::<Procedure>(catalog, name)
    }

    pub fn delete_tvf(&self, catalog: &mut Catalog, name: &str) -> Result<()> {
        self.delete::<TableValuedFunction>(catalog, name)
    }
}

/// Copy a catalog tree. Nodes and namespace maps are new; resources are shared.
pub fn copy_catalog(catalog: &Catalog) -> Catalog {
    debug!("Copying catalog '{}'", catalog.name());
    catalog.clone()
}

pub fn create_table(catalog: &mut Catalog, name: &str, table: Table, mode: CreateMode) -> Result<Arc<Table>> {
    CatalogOperations::default().create_table(catalog, name, table, mode)
}

pub fn create_function(catalog: &mut Catalog, name: &str, function: Function, mode: CreateMode) -> Result<Arc<Function>> {
    CatalogOperations::default().create_function(catalog, name, function, mode)
}

pub fn create_procedure(catalog: &mut Catalog, name: &str, procedure: Procedure, mode: CreateMode) -> Result<Arc<Procedure>> {
    CatalogOperations::default().create_procedure(catalog, name, procedure, mode)
}

pub fn create_tvf(
    catalog: &mut Catalog,
    name: &str,
    tvf: TableValuedFunction,
    mode: CreateMode,
) -> Result<Arc<TableValuedFunction>> {
    CatalogOperations::default().create_tvf(catalog, name, tvf, mode)
}

pub fn delete_table(catalog: &mut Catalog, name: &str) -> Result<()> {
    CatalogOperations::default().delete_table(catalog, name)
}

pub fn delete_function(catalog: &mut Catalog, name: &str) -> Result<()> {
    CatalogOperations::default().delete_function(catalog, name)
}

pub fn delete_function_by_full_name(catalog: &mut Catalog, full_name: &str) -> Result<()> {
    CatalogOperations::default().delete_function_by_full_name(catalog, full_name)
}

pub fn delete_procedure(catalog: &mut Catalog, name: &str) -> Result<()> {
    CatalogOperations::default().delete_procedure(catalog, name)
}

pub fn delete_tvf(catalog: &mut Catalog, name: &str) -> Result<()> {
    CatalogOperations::default().delete_tvf(catalog, name)
}

pub fn find_table<S: AsRef<str>>(catalog: &Catalog, path: &[S]) -> Result<Arc<Table>> {
    find(catalog, path)
}

/// Find a function by name path; if several groups share the name, the first
/// registered wins
pub fn find_function<S: AsRef<str>>(catalog: &Catalog, path: &[S]) -> Result<Arc<Function>> {
    find(catalog, path)
}

/// Find a function on the root node by its `group:name` key
pub fn find_function_by_full_name(catalog: &Catalog, full_name: &str) -> Result<Arc<Function>> {
    catalog
        .get_function_by_full_name(full_name)
        .ok_or_else(|| CatalogError::not_found(Function::KIND, full_name))
}

pub fn find_procedure<S: AsRef<str>>(catalog: &Catalog, path: &[S]) -> Result<Arc<Procedure>> {
    find(catalog, path)
}

pub fn find_tvf<S: AsRef<str>>(catalog: &Catalog, path: &[S]) -> Result<Arc<TableValuedFunction>> {
    find(catalog, path)
}
