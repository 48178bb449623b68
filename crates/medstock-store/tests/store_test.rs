//! Integration tests for the inventory store.
//!
//! These exercise the full operation contract: validation, persistence
//! after every mutation, audit logging, and rollback on persistence
//! failure.

use medstock_core::InventoryError;
use medstock_store::{StorageError, Store, StoreError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> (Store, PathBuf, PathBuf) {
    let inventory_path = dir.path().join("inventory.json");
    let audit_path = dir.path().join("withdrawals.log");
    let store = Store::open(&inventory_path, &audit_path).expect("should open empty store");
    (store, inventory_path, audit_path)
}

#[test]
fn test_add_then_stock() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();

    let lines = store.stock();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].name, "Paracetamol");
    assert_eq!(lines[0].quantity, 50);
    assert_eq!(lines[0].expiry, "January 02, 2030");
}

#[test]
fn test_add_persists_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, audit_path) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    drop(store);

    // A fresh store sees the record
    let reopened = Store::open(&inventory_path, &audit_path).unwrap();
    assert_eq!(reopened.inventory().get("Paracetamol").unwrap().quantity, 50);
}

#[test]
fn test_add_duplicate_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    let err = store.add("Paracetamol", 10, "01/02/2031").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Inventory(InventoryError::Duplicate { .. })
    ));
    assert_eq!(store.inventory().get("Paracetamol").unwrap().quantity, 50);
}

#[test]
fn test_add_validation_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, _) = open_store(&dir);

    for err in [
        store.add("", 10, "01/02/2030").unwrap_err(),
        store.add("Ibuprofen", 0, "01/02/2030").unwrap_err(),
        store.add("Ibuprofen", 10, "2030-01-02").unwrap_err(),
    ] {
        assert!(matches!(
            err,
            StoreError::Inventory(InventoryError::Validation(_))
        ));
    }

    assert!(store.inventory().is_empty());
    // No write ever happened
    assert!(!inventory_path.exists());
}

#[test]
fn test_withdraw_reduces_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, audit_path) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    let remaining = store
        .withdraw("Paracetamol", 10, "Nurse Jane", "Headache")
        .unwrap();
    assert_eq!(remaining, 40);
    assert_eq!(store.inventory().get("Paracetamol").unwrap().quantity, 40);

    let log = fs::read_to_string(&audit_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Nurse Jane"));
    assert!(lines[0].contains("took 10 of Paracetamol"));
    assert!(lines[0].contains("(Reason: Headache)"));
}

#[test]
fn test_overdraw_rejected_without_log_entry() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, audit_path) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    let err = store
        .withdraw("Paracetamol", 51, "Nurse Jane", "Headache")
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Inventory(InventoryError::InvalidRequest)
    ));
    assert_eq!(store.inventory().get("Paracetamol").unwrap().quantity, 50);
    assert!(!audit_path.exists());
}

#[test]
fn test_withdraw_from_empty_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    let err = store.withdraw("Aspirin", 1, "X", "Y").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Inventory(InventoryError::InvalidRequest)
    ));
}

#[test]
fn test_edit_quantity_keeps_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    store.edit("Paracetamol", Some(5), None).unwrap();

    let lines = store.stock();
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(lines[0].expiry, "January 02, 2030");
}

#[test]
fn test_edit_missing_name() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    let err = store.edit("Paracetamol", Some(5), None).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Inventory(InventoryError::NotFound { .. })
    ));
}

#[test]
fn test_delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    store.add("Aspirin", 20, "06/15/2027").unwrap();

    assert!(store.delete("Paracetamol").unwrap());
    // Deleting again is a silent no-op
    assert!(!store.delete("Paracetamol").unwrap());
    // Other records untouched
    assert_eq!(store.inventory().get("Aspirin").unwrap().quantity, 20);
}

#[test]
fn test_full_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, audit_path) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();
    let lines = store.stock();
    assert_eq!(
        (
            lines[0].name.as_str(),
            lines[0].quantity,
            lines[0].expiry.as_str()
        ),
        ("Paracetamol", 50, "January 02, 2030")
    );

    store
        .withdraw("Paracetamol", 10, "Nurse Jane", "Headache")
        .unwrap();
    assert_eq!(store.stock()[0].quantity, 40);

    store.edit("Paracetamol", Some(5), None).unwrap();
    let lines = store.stock();
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(lines[0].expiry, "January 02, 2030");

    // Everything above survives a reopen
    drop(store);
    let reopened = Store::open(&inventory_path, &audit_path).unwrap();
    assert_eq!(reopened.stock()[0].quantity, 5);
    assert_eq!(fs::read_to_string(&audit_path).unwrap().lines().count(), 1);
}

#[test]
fn test_reopen_preserves_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, audit_path) = open_store(&dir);

    for name in ["Zinc", "Aspirin", "Mefenamic Acid"] {
        store.add(name, 10, "01/02/2030").unwrap();
    }
    drop(store);

    let reopened = Store::open(&inventory_path, &audit_path).unwrap();
    let names: Vec<String> = reopened.stock().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Zinc", "Aspirin", "Mefenamic Acid"]);
}

#[test]
fn test_corrupt_inventory_file_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let inventory_path = dir.path().join("inventory.json");
    let audit_path = dir.path().join("withdrawals.log");
    fs::write(&inventory_path, "{ definitely not an inventory").unwrap();

    let err = Store::open(&inventory_path, &audit_path).unwrap_err();
    assert!(matches!(err, StorageError::Malformed { .. }));
}

#[test]
fn test_save_failure_rolls_back_memory() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();

    // Make the inventory path unwritable by turning it into a directory
    fs::remove_file(&inventory_path).unwrap();
    fs::create_dir(&inventory_path).unwrap();

    let err = store.add("Aspirin", 20, "06/15/2027").unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));

    // The in-memory inventory matches the last successful save
    assert!(store.inventory().get("Aspirin").is_none());
    assert_eq!(store.inventory().get("Paracetamol").unwrap().quantity, 50);
}

#[test]
fn test_withdraw_save_failure_rolls_back_quantity() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, inventory_path, _) = open_store(&dir);

    store.add("Paracetamol", 50, "01/02/2030").unwrap();

    fs::remove_file(&inventory_path).unwrap();
    fs::create_dir(&inventory_path).unwrap();

    let err = store
        .withdraw("Paracetamol", 10, "Nurse Jane", "Headache")
        .unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert_eq!(store.inventory().get("Paracetamol").unwrap().quantity, 50);
}
