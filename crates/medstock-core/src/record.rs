//! Stock records and withdrawal log entries.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stocked item: the quantity on hand plus its expiry date string.
///
/// The expiry is kept exactly as entered (see [`crate::expiry`]); rendering
/// happens at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Item name, the unique case-sensitive key.
    pub name: String,
    /// Units on hand.
    pub quantity: u32,
    /// Expiry date in `MM/DD/YYYY` shape, stored as entered.
    pub expiry: String,
}

impl StockRecord {
    /// Create a new stock record.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32, expiry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            expiry: expiry.into(),
        }
    }
}

/// One withdrawal, as it appears in the audit log.
///
/// Entries are append-only: once written they are never edited, removed, or
/// read back by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalEntry {
    /// When the withdrawal happened (local time).
    pub timestamp: NaiveDateTime,
    /// Who took the item.
    pub person: String,
    /// How many units were taken.
    pub quantity: u32,
    /// Which item was taken.
    pub item: String,
    /// Free-text reason.
    pub reason: String,
}

impl WithdrawalEntry {
    /// Create an entry with an explicit timestamp.
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        person: impl Into<String>,
        quantity: u32,
        item: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            person: person.into(),
            quantity,
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Create an entry stamped with the current local time.
    #[must_use]
    pub fn now(
        person: impl Into<String>,
        quantity: u32,
        item: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(Local::now().naive_local(), person, quantity, item, reason)
    }
}

impl fmt::Display for WithdrawalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} took {} of {} (Reason: {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.person,
            self.quantity,
            self.item,
            self.reason
        )
    }
}
