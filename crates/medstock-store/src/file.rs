//! The persisted inventory file.
//!
//! The inventory is stored as one versioned JSON document and rewritten
//! wholesale on every successful mutation:
//!
//! ```json
//! {
//!   "version": 1,
//!   "items": [
//!     { "name": "Paracetamol", "quantity": 50, "expiry": "01/02/2030" }
//!   ]
//! }
//! ```
//!
//! A missing file means an empty inventory. Anything else that stops the
//! document from loading is surfaced as a [`StorageError`]; corruption is
//! never papered over with empty data.

use medstock_core::{Inventory, StockRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::StorageError;

/// Version written to and expected from the document.
pub(crate) const FORMAT_VERSION: u32 = 1;

/// The on-disk document shape, distinct from the in-memory [`Inventory`].
#[derive(Debug, Serialize, Deserialize)]
struct InventoryDocument {
    version: u32,
    items: Vec<StockRecord>,
}

/// Read the full inventory from `path`.
///
/// A missing file yields an empty inventory. An unreadable file, malformed
/// JSON, an unknown version, or decoded records that violate the inventory
/// invariants are all errors.
pub(crate) fn load_inventory(path: &Path) -> Result<Inventory, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no inventory file yet, starting empty");
            return Ok(Inventory::new());
        }
        Err(err) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };

    let doc: InventoryDocument =
        serde_json::from_str(&text).map_err(|err| StorageError::Malformed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    if doc.version != FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: doc.version,
            expected: FORMAT_VERSION,
        });
    }

    let inventory = Inventory::from_records(doc.items).map_err(|err| StorageError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    debug!(path = %path.display(), records = inventory.len(), "loaded inventory");
    Ok(inventory)
}

/// Atomically overwrite `path` with the full inventory.
///
/// The document is written to a temporary file in the same directory and
/// renamed over the target, so a crash mid-write never leaves a truncated
/// inventory behind.
pub(crate) fn save_inventory(path: &Path, inventory: &Inventory) -> Result<(), StorageError> {
    let doc = InventoryDocument {
        version: FORMAT_VERSION,
        items: inventory.records().to_vec(),
    };
    let json = serde_json::to_string_pretty(&doc).map_err(|err| StorageError::Encode {
        path: path.to_path_buf(),
        source: err,
    })?;

    let write_err = |err: io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source: err,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new("."))).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;

    debug!(path = %path.display(), records = inventory.len(), "saved inventory");
    Ok(())
}
