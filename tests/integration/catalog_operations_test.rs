// Catalog Operations Integration Tests
//
// Create, replace, delete, lookup and copy across all four resource kinds.

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use catalog_toolkit::catalog::{
    copy_catalog, create_function, create_procedure, create_table, create_tvf, delete_function,
    delete_function_by_full_name, delete_procedure, delete_table, delete_tvf, find_function, find_function_by_full_name,
    find_procedure, find_table, find_tvf, Catalog, CatalogError, CreateMode, ResourceKind, Table,
};
use catalog_toolkit::types::{Type, TypeKind};

#[path = "../common/mod.rs"]
mod common;
use common::{create_sample_catalog, create_test_catalog, procedure, sample_table, tvf, udf};

#[test]
fn test_create_table_with_qualified_name() -> Result<()> {
    let mut catalog = create_test_catalog();
    let table = Table::new("newTable", vec![]).with_full_name("qualified.newTable");

    create_table(&mut catalog, "qualified.newTable", table, CreateMode::CreateDefault)?;

    let found = find_table(&catalog, &["qualified.newTable"])?;
    assert_eq!(found.full_name(), "qualified.newTable");
    assert!(find_table(&catalog, &["qualified", "newTable"]).is_ok());
    Ok(())
}

#[test]
fn test_delete_table() -> Result<()> {
    let mut catalog = create_test_catalog();

    delete_table(&mut catalog, "sample")?;

    assert!(find_table(&catalog, &["sample"]).unwrap_err().is_not_found());
    // The nested catalog's table is a different resource
    assert!(find_table(&catalog, &["nested", "sample"]).is_ok());
    Ok(())
}

#[test]
fn test_table_already_exists() {
    let mut catalog = create_test_catalog();
    let original = find_table(&catalog, &["sample"]).unwrap();

    let err = create_table(&mut catalog, "sample", sample_table(TypeKind::Int64), CreateMode::CreateDefault)
        .unwrap_err();

    assert_eq!(
        err,
        CatalogError::AlreadyExists { kind: ResourceKind::Table, name: "sample".to_string() }
    );
    assert!(Arc::ptr_eq(&original, &find_table(&catalog, &["sample"]).unwrap()));
}

#[test]
fn test_replace_table() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_table(&mut catalog, "sample", sample_table(TypeKind::Int64), CreateMode::CreateOrReplace)?;

    let found = find_table(&catalog, &["sample"])?;
    assert_eq!(found.column(0).unwrap().data_type(), &Type::Simple(TypeKind::Int64));
    Ok(())
}

#[test]
fn test_create_then_replace_from_empty_catalog() -> Result<()> {
    let mut catalog = Catalog::new("root");

    create_table(&mut catalog, "sample", sample_table(TypeKind::String), CreateMode::CreateDefault)?;
    create_table(&mut catalog, "sample", sample_table(TypeKind::Int64), CreateMode::CreateOrReplace)?;

    let found = find_table(&catalog, &["sample"])?;
    assert_eq!(found.get_column("column").unwrap().data_type(), &Type::Simple(TypeKind::Int64));
    Ok(())
}

#[test]
fn test_create_table_if_not_exists_keeps_existing() -> Result<()> {
    let mut catalog = create_test_catalog();
    let original = find_table(&catalog, &["sample"])?;

    let returned = create_table(
        &mut catalog,
        "sample",
        sample_table(TypeKind::Int64),
        CreateMode::CreateIfNotExists,
    )?;

    let found = find_table(&catalog, &["sample"])?;
    assert!(Arc::ptr_eq(&original, &found));
    assert!(Arc::ptr_eq(&original, &returned));
    assert_eq!(found.column(0).unwrap().data_type(), &Type::Simple(TypeKind::String));
    Ok(())
}

#[test]
fn test_create_table_if_not_exists_creates_new() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_table(
        &mut catalog,
        "newTable",
        Table::new("newTable", vec![]),
        CreateMode::CreateIfNotExists,
    )?;

    assert!(find_table(&catalog, &["newTable"]).is_ok());
    Ok(())
}

#[test]
fn test_lookup_is_case_insensitive() -> Result<()> {
    let catalog = create_test_catalog();
    assert!(find_table(&catalog, &["SAMPLE"]).is_ok());
    assert!(find_table(&catalog, &["Nested", "Sample"]).is_ok());
    Ok(())
}

#[test]
fn test_lookup_through_missing_catalog() {
    let catalog = create_test_catalog();
    let err = find_table(&catalog, &["missing", "sample"]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::NotFound { kind: ResourceKind::Table, path: "missing.sample".to_string() }
    );
}

#[test]
fn test_create_function() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_function(&mut catalog, "qualified.newFunction", udf("qualified.newFunction", "UDF"), CreateMode::CreateDefault)?;

    let function = find_function_by_full_name(&catalog, "UDF:qualified.newFunction")?;
    assert_eq!(function.group(), "UDF");
    assert!(find_function(&catalog, &["qualified", "newFunction"]).is_ok());
    Ok(())
}

#[test]
fn test_functions_in_different_groups_are_distinct() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_function(&mut catalog, "fn", udf("fn", "UDF"), CreateMode::CreateDefault)?;
    create_function(&mut catalog, "fn", udf("fn", "Templated"), CreateMode::CreateDefault)?;

    assert_eq!(catalog.functions().len(), 2);
    assert!(create_function(&mut catalog, "fn", udf("fn", "UDF"), CreateMode::CreateDefault)
        .unwrap_err()
        .is_already_exists());
    assert_eq!(find_function_by_full_name(&catalog, "Templated:fn")?.group(), "Templated");
    Ok(())
}

#[test]
fn test_delete_function_in_one_group() -> Result<()> {
    let mut catalog = create_test_catalog();
    create_function(&mut catalog, "fn", udf("fn", "UDF"), CreateMode::CreateDefault)?;
    create_function(&mut catalog, "fn", udf("fn", "Templated"), CreateMode::CreateDefault)?;

    delete_function(&mut catalog, "UDF:fn")?;

    assert!(find_function_by_full_name(&catalog, "UDF:fn").unwrap_err().is_not_found());
    assert_eq!(find_function(&catalog, &["fn"])?.group(), "Templated");
    assert!(delete_function_by_full_name(&mut catalog, "UDF:fn").unwrap_err().is_not_found());

    delete_function_by_full_name(&mut catalog, "Templated:fn")?;
    assert!(find_function(&catalog, &["fn"]).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_delete_qualified_function_in_one_group() -> Result<()> {
    let mut catalog = create_test_catalog();
    create_function(&mut catalog, "a.fn", udf("a.fn", "UDF"), CreateMode::CreateDefault)?;
    create_function(&mut catalog, "a.fn", udf("a.fn", "Templated"), CreateMode::CreateDefault)?;

    delete_function_by_full_name(&mut catalog, "udf:A.FN")?;

    assert_eq!(find_function(&catalog, &["a.fn"])?.group(), "Templated");
    assert_eq!(find_function(&catalog, &["a", "fn"])?.group(), "Templated");
    assert!(find_function_by_full_name(&catalog, "UDF:a.fn").unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_function_group_with_separator_is_rejected() {
    let mut catalog = create_test_catalog();

    let err = create_function(&mut catalog, "fn", udf("fn", "ns:UDF"), CreateMode::CreateDefault).unwrap_err();

    assert_eq!(err, CatalogError::InvalidName("ns:UDF".to_string()));
    assert!(catalog.functions().is_empty());
    assert!(catalog.add_function(udf("fn", "ns:UDF")).is_err());
    assert!(create_function(&mut catalog, "fn", udf("fn", "UDF"), CreateMode::CreateDefault).is_ok());
}

#[test]
fn test_delete_prunes_sub_catalogs_it_created() -> Result<()> {
    let mut catalog = create_test_catalog();

    for _ in 0..3 {
        create_table(&mut catalog, "a.b.t", sample_table(TypeKind::Int64), CreateMode::CreateDefault)?;
        assert!(catalog.descend(&["a", "b"]).is_some());
        delete_table(&mut catalog, "a.b.t")?;
        assert!(catalog.sub_catalog("a").is_none());
    }
    catalog.add_sub_catalog(Catalog::new("a"))?;

    // Sub-catalogs added directly survive deleting their last resource
    create_table(&mut catalog, "nested.t", sample_table(TypeKind::Int64), CreateMode::CreateDefault)?;
    delete_table(&mut catalog, "nested.t")?;
    delete_table(&mut catalog, "nested.sample")?;
    assert!(catalog.sub_catalog("nested").is_some_and(|nested| nested.is_empty()));

    // A node still holding something else is kept
    create_table(&mut catalog, "x.t1", sample_table(TypeKind::Int64), CreateMode::CreateDefault)?;
    create_table(&mut catalog, "x.t2", sample_table(TypeKind::Int64), CreateMode::CreateDefault)?;
    delete_table(&mut catalog, "x.t1")?;
    assert!(find_table(&catalog, &["x", "t2"]).is_ok());
    Ok(())
}

#[test]
fn test_delete_function() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_function(&mut catalog, "qualified.newFunction", udf("qualified.newFunction", "UDF"), CreateMode::CreateDefault)?;
    delete_function(&mut catalog, "qualified.newFunction")?;

    assert!(find_function_by_full_name(&catalog, "UDF:qualified.newFunction").unwrap_err().is_not_found());
    assert!(find_function(&catalog, &["qualified", "newFunction"]).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_create_and_delete_tvf() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_tvf(&mut catalog, "qualified.newTVF", tvf("qualified.newTVF"), CreateMode::CreateDefault)?;
    let found = find_tvf(&catalog, &["qualified.newTVF"])?;
    assert!(found.output_schema().is_value_table());

    delete_tvf(&mut catalog, "qualified.newTVF")?;
    assert!(catalog.get_table_valued_function("qualified.newTVF").is_none());
    Ok(())
}

#[test]
fn test_create_procedure_resolves_both_ways() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_procedure(&mut catalog, "qualified.newProcedure", procedure("qualified.newProcedure"), CreateMode::CreateDefault)?;

    let flat = find_procedure(&catalog, &["qualified.newProcedure"])?;
    let nested = find_procedure(&catalog, &["qualified", "newProcedure"])?;
    assert!(Arc::ptr_eq(&flat, &nested));
    Ok(())
}

#[test]
fn test_delete_procedure() -> Result<()> {
    let mut catalog = create_test_catalog();

    create_procedure(&mut catalog, "qualified.newProcedure", procedure("qualified.newProcedure"), CreateMode::CreateDefault)?;
    delete_procedure(&mut catalog, "qualified.newProcedure")?;

    assert!(find_procedure(&catalog, &["newProcedure"]).unwrap_err().is_not_found());
    assert!(find_procedure(&catalog, &["qualified", "newProcedure"]).unwrap_err().is_not_found());
    assert!(find_procedure(&catalog, &["qualified.newProcedure"]).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_delete_missing_resource_fails_for_every_kind() {
    let mut catalog = create_test_catalog();
    assert!(delete_table(&mut catalog, "nope").unwrap_err().is_not_found());
    assert!(delete_function(&mut catalog, "nope").unwrap_err().is_not_found());
    assert!(delete_procedure(&mut catalog, "nope").unwrap_err().is_not_found());
    assert!(delete_tvf(&mut catalog, "nope").unwrap_err().is_not_found());
}

#[test]
fn test_copy_catalog() -> Result<()> {
    let catalog = create_test_catalog();

    let copied = copy_catalog(&catalog);

    let copied_table = find_table(&copied, &["sample"])?;
    find_table(&copied, &["nested", "sample"])?;
    assert_eq!(copied_table.name(), "sample");
    assert_eq!(copied_table.column(0).unwrap().name(), "column");
    Ok(())
}

#[test]
fn test_copy_is_independent() -> Result<()> {
    let mut catalog = create_test_catalog();
    create_procedure(&mut catalog, "a.b.proc", procedure("a.b.proc"), CreateMode::CreateDefault)?;

    let mut copied = copy_catalog(&catalog);
    delete_table(&mut copied, "sample")?;
    delete_procedure(&mut copied, "a.b.proc")?;
    copied.remove_sub_catalog("nested");

    assert!(find_table(&catalog, &["sample"]).is_ok());
    assert!(find_table(&catalog, &["nested", "sample"]).is_ok());
    assert!(find_procedure(&catalog, &["a", "b", "proc"]).is_ok());

    // Changes to the original do not reach the copy either
    let copied = copy_catalog(&catalog);
    delete_table(&mut catalog, "sample")?;
    assert!(find_table(&copied, &["sample"]).is_ok());
    Ok(())
}

#[test]
fn test_copy_shares_resources() -> Result<()> {
    let catalog = create_test_catalog();
    let copied = copy_catalog(&catalog);
    assert!(Arc::ptr_eq(
        &find_table(&catalog, &["nested", "sample"])?,
        &find_table(&copied, &["nested", "sample"])?
    ));
    Ok(())
}

#[test]
fn test_invalid_name_leaves_catalog_unchanged() {
    let mut catalog = create_sample_catalog("root");
    let err = create_table(&mut catalog, "a..b", sample_table(TypeKind::Int64), CreateMode::CreateOrReplace)
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidName("a..b".to_string()));
    assert_eq!(catalog.tables().len(), 1);
    assert_eq!(catalog.sub_catalogs().count(), 0);
}

// Whatever state the catalog is in, the last CreateOrReplace wins and
// CreateDefault never overwrites.
#[test]
fn test_random_create_sequences() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let names = ["t", "a.t", "a.b.t", "other"];
    let kinds = [TypeKind::String, TypeKind::Int64, TypeKind::Date, TypeKind::Json];

    for _ in 0..50 {
        let mut catalog = Catalog::new("root");
        for _ in 0..20 {
            let name = names[rng.gen_range(0..names.len())];
            let kind = kinds[rng.gen_range(0..kinds.len())];
            let before = find_table(&catalog, &[name]).ok();

            match rng.gen_range(0..4) {
                0 => {
                    create_table(&mut catalog, name, sample_table(kind), CreateMode::CreateOrReplace)?;
                    let found = find_table(&catalog, &[name])?;
                    assert_eq!(found.column(0).unwrap().data_type(), &Type::Simple(kind));
                }
                1 => match create_table(&mut catalog, name, sample_table(kind), CreateMode::CreateDefault) {
                    Ok(_) => assert!(before.is_none()),
                    Err(err) => {
                        assert!(err.is_already_exists());
                        let after = find_table(&catalog, &[name])?;
                        assert!(Arc::ptr_eq(before.as_ref().unwrap(), &after));
                    }
                },
                2 => {
                    let stored = create_table(&mut catalog, name, sample_table(kind), CreateMode::CreateIfNotExists)?;
                    if let Some(before) = before {
                        assert!(Arc::ptr_eq(&before, &stored));
                    }
                }
                _ => {
                    let result = delete_table(&mut catalog, name);
                    assert_eq!(result.is_ok(), before.is_some());
                    assert!(find_table(&catalog, &[name]).unwrap_err().is_not_found());
                }
            }
        }
    }
    Ok(())
}
