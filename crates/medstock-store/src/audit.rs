//! The append-only withdrawal log.
//!
//! One human-readable line per withdrawal, e.g.:
//!
//! ```text
//! 2026-08-06 14:30:00 - Nurse Jane took 10 of Paracetamol (Reason: Headache)
//! ```
//!
//! The file is only ever appended to; prior lines are never truncated or
//! rewritten, and nothing in the application reads the log back.

use medstock_core::WithdrawalEntry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::StorageError;

/// Append one withdrawal line to the log at `path`, creating it if needed.
pub(crate) fn append_withdrawal(path: &Path, entry: &WithdrawalEntry) -> Result<(), StorageError> {
    let write_err = |err: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source: err,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    writeln!(file, "{entry}").map_err(write_err)?;

    debug!(path = %path.display(), item = %entry.item, "appended withdrawal entry");
    Ok(())
}
