//! Integration tests for by-type-name default resolution.
//!
//! A missing entry is backed by a `TypeCatalog` lookup: on success the
//! resolved handle itself is installed; on failure nothing is registered
//! and the error comes back as a value.

use shared_registry::{Registry, RegistryError, TypeCatalog};
use std::sync::Arc;

#[derive(Default)]
struct ConnectionPool {
    size: usize,
}

fn catalog_with_pool() -> TypeCatalog {
    let catalog = TypeCatalog::new();
    catalog.register::<ConnectionPool>("db.ConnectionPool");
    catalog
}

#[test]
fn test_resolution_installs_handle() {
    let registry = Registry::new();
    let catalog = catalog_with_pool();

    let retrieval = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &catalog)
        .unwrap();

    assert!(retrieval.default_installed);
    assert_eq!(retrieval.value.type_name(), "db.ConnectionPool");

    // The handle (not an instance) is what got registered
    assert!(registry.contains("pool"));
    let instance = retrieval.value.instantiate();
    let pool = instance.downcast::<ConnectionPool>().unwrap();
    assert_eq!(pool.size, 0);
}

#[test]
fn test_second_resolution_returns_same_handle() {
    let registry = Registry::new();
    let catalog = catalog_with_pool();

    let first = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &catalog)
        .unwrap();
    let second = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &catalog)
        .unwrap();

    assert!(first.default_installed);
    assert!(!second.default_installed);
    assert!(Arc::ptr_eq(&first.value, &second.value));
}

#[test]
fn test_unknown_type_name_registers_nothing() {
    let registry = Registry::new();
    let catalog = catalog_with_pool();

    let result = registry.retrieve_or_resolve("pool", "does.not.Exist", &catalog);
    assert_eq!(
        result.unwrap_err(),
        RegistryError::UnknownTypeName {
            type_name: "does.not.Exist".to_string()
        }
    );

    // No partial registration on failure
    assert!(registry.retrieve("pool").is_none());
}

#[test]
fn test_resolution_failure_is_descriptive() {
    let registry = Registry::new();
    let catalog = TypeCatalog::new();

    let err = registry
        .retrieve_or_resolve("pool", "does.not.Exist", &catalog)
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown type name: does.not.Exist");
}

#[test]
fn test_existing_entry_short_circuits_resolution() {
    let registry = Registry::new();
    let catalog = catalog_with_pool();

    // Install the handle, then empty out the catalog's role by using a
    // fresh one; the registered entry must still come back untouched.
    let first = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &catalog)
        .unwrap();

    let empty = TypeCatalog::new();
    let second = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &empty)
        .unwrap();

    assert!(!second.default_installed);
    assert!(Arc::ptr_eq(&first.value, &second.value));
}

#[test]
fn test_existing_non_handle_entry_is_reported() {
    let registry = Registry::new();
    let catalog = catalog_with_pool();

    registry.register("pool", 42i32);

    let result = registry.retrieve_or_resolve("pool", "db.ConnectionPool", &catalog);
    assert!(matches!(
        result.unwrap_err(),
        RegistryError::TypeMismatch { .. }
    ));
}

#[test]
fn test_constructor_backed_resolution() {
    let registry = Registry::new();

    let catalog = TypeCatalog::new();
    catalog.register_with("db.ConnectionPool", || ConnectionPool { size: 8 });

    let retrieval = registry
        .retrieve_or_resolve("pool", "db.ConnectionPool", &catalog)
        .unwrap();

    let pool = retrieval
        .value
        .instantiate()
        .downcast::<ConnectionPool>()
        .unwrap();
    assert_eq!(pool.size, 8);
}
