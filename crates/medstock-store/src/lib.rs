//! Inventory store for medstock.
//!
//! This crate binds an in-memory [`Inventory`] to its two on-disk artifacts
//! (the JSON inventory file and the append-only withdrawal log) and exposes
//! the five stock operations with durable-persist-before-return semantics:
//!
//! - [`Store::add`] - stock a new item
//! - [`Store::edit`] - change an item's quantity and/or expiry
//! - [`Store::stock`] - the rendered stock listing
//! - [`Store::withdraw`] - take units out, with an audit-log entry
//! - [`Store::delete`] - remove an item (idempotent)
//!
//! Every mutating operation either returns success with the change already
//! written to disk, or a typed failure with the in-memory inventory rolled
//! back to match the disk state.
//!
//! # Example
//!
//! ```ignore
//! use medstock_store::Store;
//!
//! let mut store = Store::open("inventory.json", "withdrawals.log")?;
//! store.add("Paracetamol", 50, "01/02/2030")?;
//! let remaining = store.withdraw("Paracetamol", 10, "Nurse Jane", "Headache")?;
//! assert_eq!(remaining, 40);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod file;

use medstock_core::{Inventory, InventoryError, StockLine, WithdrawalEntry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The inventory file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written or replaced.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The inventory could not be serialized.
    #[error("failed to encode inventory for {path}: {source}")]
    Encode {
        /// The intended destination path.
        path: PathBuf,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The inventory file does not decode to a valid inventory document.
    #[error("malformed inventory file {path}: {message}")]
    Malformed {
        /// The file that failed to decode.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The inventory file carries a version this build does not understand.
    #[error("inventory file {path} has unsupported version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The file with the unexpected version.
        path: PathBuf,
        /// The version found in the file.
        found: u32,
        /// The version this build writes.
        expected: u32,
    },
}

/// Any failure a store operation can return: a domain rejection or a
/// persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation was rejected before any mutation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Persistence failed; the in-memory inventory was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The inventory store: an in-memory [`Inventory`] plus the paths it
/// persists to.
///
/// Constructed once at startup via [`Store::open`] and owned by the
/// presentation layer; there is no ambient or static state.
#[derive(Debug)]
pub struct Store {
    inventory: Inventory,
    inventory_path: PathBuf,
    audit_path: PathBuf,
}

impl Store {
    /// Open a store, loading the inventory from `inventory_path`.
    ///
    /// A missing inventory file yields an empty store; a present-but-broken
    /// one is an error (see [`StorageError`]). Parent directories of both
    /// paths are created if needed.
    pub fn open(
        inventory_path: impl Into<PathBuf>,
        audit_path: impl Into<PathBuf>,
    ) -> Result<Self, StorageError> {
        let inventory_path = inventory_path.into();
        let audit_path = audit_path.into();

        for path in [&inventory_path, &audit_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|err| StorageError::Write {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
            }
        }

        let inventory = file::load_inventory(&inventory_path)?;
        Ok(Self {
            inventory,
            inventory_path,
            audit_path,
        })
    }

    /// The current in-memory inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Stock a new item and persist.
    pub fn add(&mut self, name: &str, quantity: u32, expiry: &str) -> Result<(), StoreError> {
        let snapshot = self.inventory.clone();
        self.inventory.insert(name, quantity, expiry)?;
        self.save_or_rollback(snapshot)?;
        info!(item = name, quantity, expiry, "added stock record");
        Ok(())
    }

    /// Change an item's quantity and/or expiry and persist.
    ///
    /// Omitted fields are left unchanged; see
    /// [`Inventory::update`](medstock_core::Inventory::update) for the
    /// validation rules.
    pub fn edit(
        &mut self,
        name: &str,
        quantity: Option<u32>,
        expiry: Option<&str>,
    ) -> Result<(), StoreError> {
        let snapshot = self.inventory.clone();
        self.inventory.update(name, quantity, expiry)?;
        self.save_or_rollback(snapshot)?;
        info!(item = name, "edited stock record");
        Ok(())
    }

    /// The rendered stock listing, in insertion order.
    #[must_use]
    pub fn stock(&self) -> Vec<StockLine> {
        self.inventory.stock()
    }

    /// Withdraw `quantity` units of `name`, append the audit entry, and
    /// persist. Returns the remaining quantity.
    ///
    /// The audit append and the inventory save must both succeed; on any
    /// failure the in-memory decrement is rolled back and the error is
    /// returned. A save failure after the append leaves the appended line
    /// in place - the log is append-only and is never rewritten.
    pub fn withdraw(
        &mut self,
        name: &str,
        quantity: u32,
        person: &str,
        reason: &str,
    ) -> Result<u32, StoreError> {
        let snapshot = self.inventory.clone();
        let remaining = self.inventory.withdraw(name, quantity)?;

        let entry = WithdrawalEntry::now(person, quantity, name, reason);
        if let Err(err) = audit::append_withdrawal(&self.audit_path, &entry) {
            self.inventory = snapshot;
            return Err(err.into());
        }

        self.save_or_rollback(snapshot)?;
        info!(item = name, quantity, person, remaining, "recorded withdrawal");
        Ok(remaining)
    }

    /// Remove an item and persist. Removing an absent name is a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let snapshot = self.inventory.clone();
        if !self.inventory.remove(name) {
            return Ok(false);
        }
        self.save_or_rollback(snapshot)?;
        info!(item = name, "deleted stock record");
        Ok(true)
    }

    /// The path of the persisted inventory file.
    #[must_use]
    pub fn inventory_path(&self) -> &Path {
        &self.inventory_path
    }

    /// The path of the withdrawal log.
    #[must_use]
    pub fn audit_path(&self) -> &Path {
        &self.audit_path
    }

    fn save_or_rollback(&mut self, snapshot: Inventory) -> Result<(), StoreError> {
        if let Err(err) = file::save_inventory(&self.inventory_path, &self.inventory) {
            self.inventory = snapshot;
            return Err(err.into());
        }
        Ok(())
    }
}
