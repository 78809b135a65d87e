use std::sync::Arc;
use linked_hash_map::LinkedHashMap;

use super::error::{CatalogError, ResourceKind, Result};
use super::function::{Function, Procedure, TableValuedFunction};
use super::namespace::{normalize_name, Namespace};
use super::resource::CatalogResource;
use super::table::Table;

/// A node of the catalog tree.
///
/// Each node owns four independent namespaces (tables, functions, procedures
/// and table-valued functions) plus its nested sub-catalogs. `Clone` produces a
/// structurally independent tree: every node and every namespace map is new,
/// while the immutable resources themselves are shared through `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    pub(crate) tables: Namespace<Table>,
    pub(crate) functions: Namespace<Function>,
    pub(crate) procedures: Namespace<Procedure>,
    pub(crate) table_valued_functions: Namespace<TableValuedFunction>,
    catalogs: LinkedHashMap<String, Catalog>,
    // Created on demand by a dotted registration rather than added by a caller
    implicit: bool,
}

impl Catalog {
    /// Create a new, empty catalog
    pub fn new(name: impl Into<String>) -> Self {
        Catalog {
            name: name.into(),
            tables: Namespace::new(),
            functions: Namespace::new(),
            procedures: Namespace::new(),
            table_valued_functions: Namespace::new(),
            catalogs: LinkedHashMap::new(),
            implicit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tables(&self) -> &Namespace<Table> {
        &self.tables
    }

    pub fn functions(&self) -> &Namespace<Function> {
        &self.functions
    }

    pub fn procedures(&self) -> &Namespace<Procedure> {
        &self.procedures
    }

    pub fn table_valued_functions(&self) -> &Namespace<TableValuedFunction> {
        &self.table_valued_functions
    }

    /// Whether this node was created on demand by a dotted registration
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// True if the node holds no resources and no sub-catalogs
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.functions.is_empty()
            && self.procedures.is_empty()
            && self.table_valued_functions.is_empty()
            && self.catalogs.is_empty()
    }

    /// Add a resource to this node under its own name
    pub fn add<R: CatalogResource>(&mut self, resource: R) -> Result<Arc<R>> {
        resource.validate()?;
        let key = resource.storage_key(&resource.default_name());
        let namespace = R::namespace_mut(self);
        if namespace.contains(&key) {
            return Err(CatalogError::already_exists(R::KIND, key));
        }

        let resource = Arc::new(resource);
        namespace.insert(&key, Arc::clone(&resource));
        Ok(resource)
    }

    /// Look up a resource on this node by plain name
    pub fn get<R: CatalogResource>(&self, name: &str) -> Option<Arc<R>> {
        R::find_named(R::namespace(self), name)
    }

    /// Remove every resource of kind `R` this node holds under `name`
    pub fn remove<R: CatalogResource>(&mut self, name: &str) -> Vec<Arc<R>> {
        let keys = R::keys_named(R::namespace(self), name);
        let namespace = R::namespace_mut(self);
        keys.iter().filter_map(|key| namespace.remove(key)).collect()
    }

    pub fn add_table(&mut self, table: Table) -> Result<Arc<Table>> {
        self.add(table)
    }

    pub fn get_table(&self, name: &str) -> Option<Arc<Table>> {
        self.get(name)
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains(name)
    }

    pub fn add_function(&mut self, function: Function) -> Result<Arc<Function>> {
        self.add(function)
    }

    /// Look up a function by its `group:name` key
    pub fn get_function_by_full_name(&self, full_name: &str) -> Option<Arc<Function>> {
        self.functions.get(full_name).cloned()
    }

    pub fn add_procedure(&mut self, procedure: Procedure) -> Result<Arc<Procedure>> {
        self.add(procedure)
    }

    pub fn add_table_valued_function(&mut self, tvf: TableValuedFunction) -> Result<Arc<TableValuedFunction>> {
        self.add(tvf)
    }

    pub fn get_table_valued_function(&self, name: &str) -> Option<Arc<TableValuedFunction>> {
        self.get(name)
    }

    /// Nest `catalog` under this node
    pub fn add_sub_catalog(&mut self, catalog: Catalog) -> Result<&mut Catalog> {
        let key = normalize_name(catalog.name());
        if self.catalogs.contains_key(&key) {
            return Err(CatalogError::already_exists(ResourceKind::Catalog, catalog.name()));
        }
        Ok(self.catalogs.entry(key).or_insert(catalog))
    }

    pub fn sub_catalog(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.get(&normalize_name(name))
    }

    pub fn sub_catalog_mut(&mut self, name: &str) -> Option<&mut Catalog> {
        self.catalogs.get_mut(&normalize_name(name))
    }

    pub fn get_or_create_sub_catalog(&mut self, name: &str) -> &mut Catalog {
        self.catalogs
            .entry(normalize_name(name))
            .or_insert_with(|| Catalog::new(name))
    }

    pub fn remove_sub_catalog(&mut self, name: &str) -> Option<Catalog> {
        self.catalogs.remove(&normalize_name(name))
    }

    pub fn sub_catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }

    /// Walk down through the named sub-catalogs
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<&Catalog> {
        path.iter()
            .try_fold(self, |node, segment| node.sub_catalog(segment.as_ref()))
    }

    pub fn descend_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut Catalog> {
        let mut node = self;
        for segment in path {
            node = node.sub_catalog_mut(segment.as_ref())?;
        }
        Some(node)
    }

    /// Walk down through the named sub-catalogs, creating missing ones.
    /// Nodes created here are marked implicit.
    pub fn descend_or_create<S: AsRef<str>>(&mut self, path: &[S]) -> &mut Catalog {
        let mut node = self;
        for segment in path {
            let name = segment.as_ref();
            node = node.catalogs.entry(normalize_name(name)).or_insert_with(|| Catalog {
                implicit: true,
                ..Catalog::new(name)
            });
        }
        node
    }

    /// Remove implicit nodes along `path` that have become empty, deepest
    /// first. Stops at the first node that is kept.
    pub fn prune_implicit<S: AsRef<str>>(&mut self, path: &[S]) -> usize {
        let mut pruned = 0;
        for depth in (1..=path.len()).rev() {
            let (name, parents) = match path[..depth].split_last() {
                Some(split) => split,
                None => break,
            };
            let parent = match self.descend_mut(parents) {
                Some(parent) => parent,
                None => break,
            };

            let prunable = parent
                .sub_catalog(name.as_ref())
                .is_some_and(|node| node.implicit && node.is_empty());
            if !prunable {
                break;
            }
            parent.remove_sub_catalog(name.as_ref());
            pruned += 1;
        }
        pruned
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new("catalog")
    }
}
