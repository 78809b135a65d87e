use std::sync::Arc;
use std::thread;

use catalog_toolkit::catalog::{create_table, delete_table, find_table, CreateMode, SharedCatalog, Table};

#[path = "../common/mod.rs"]
mod common;
use common::create_test_catalog;

#[test]
fn test_concurrent_creates_under_write_lock() {
    let shared = SharedCatalog::new(create_test_catalog());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let name = format!("w{}.t{}", worker, i);
                    shared
                        .with_write(|catalog| {
                            create_table(catalog, &name, Table::new(name.clone(), vec![]), CreateMode::CreateIfNotExists)
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let catalog = shared.read();
    // 200 flat names plus the original sample
    assert_eq!(catalog.tables().len(), 201);
    assert!(find_table(&catalog, &["w3", "t24"]).is_ok());
}

#[test]
fn test_racing_default_creates_admit_one_winner() {
    let shared = SharedCatalog::new(create_test_catalog());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.with_write(|catalog| {
                    create_table(catalog, "contended", Table::new("contended", vec![]), CreateMode::CreateDefault)
                })
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|result| result.is_ok())
        .count();
    assert_eq!(winners, 1);
}

#[test]
fn test_snapshot_is_independent() {
    let shared = SharedCatalog::from(create_test_catalog());
    let snapshot = shared.snapshot();

    delete_table(&mut shared.write(), "sample").unwrap();

    assert!(find_table(&snapshot, &["sample"]).is_ok());
    assert!(find_table(&shared.read(), &["sample"]).is_err());
    assert!(Arc::ptr_eq(
        &find_table(&snapshot, &["nested", "sample"]).unwrap(),
        &find_table(&shared.read(), &["nested", "sample"]).unwrap()
    ));
}
