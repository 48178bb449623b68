//! The in-memory inventory: an insertion-ordered collection of stock records.
//!
//! An [`Inventory`] holds one [`StockRecord`] per item name and provides the
//! in-memory half of the five store operations: insert, update, withdraw,
//! remove, and the stock listing. Persistence is layered on top by
//! `medstock-store`; nothing here touches the filesystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::expiry;
use crate::record::StockRecord;

/// The specific rule an insert or update violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The item name was empty.
    EmptyName,
    /// The quantity to add was zero.
    ZeroQuantity,
    /// The expiry string did not have the `MM/DD/YYYY` shape.
    BadExpiryShape,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::ZeroQuantity => write!(f, "quantity must be positive"),
            Self::BadExpiryShape => write!(f, "expiry date must look like MM/DD/YYYY"),
        }
    }
}

/// Why an inventory mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Malformed input on insert or update.
    #[error("invalid input: {0}")]
    Validation(ValidationFailure),

    /// Insert of a name that is already stocked.
    #[error("\"{name}\" already exists, edit it instead")]
    Duplicate {
        /// The name that was already present.
        name: String,
    },

    /// Update of a name that is not stocked.
    #[error("\"{name}\" not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A withdrawal precondition failed: unknown item, zero quantity, or
    /// more units requested than are on hand. Deliberately one kind.
    #[error("invalid request")]
    InvalidRequest,
}

/// One line of the stock listing, with the expiry already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    /// Item name.
    pub name: String,
    /// Units on hand.
    pub quantity: u32,
    /// Expiry in long form when it parses, verbatim otherwise.
    pub expiry: String,
}

/// An insertion-ordered collection of stock records with unique names.
///
/// Lookup is by linear scan; inventories are a handful of records, and the
/// scan keeps listing order identical to insertion order.
///
/// # Examples
///
/// ```
/// use medstock_core::{Inventory, InventoryError};
///
/// let mut inv = Inventory::new();
/// inv.insert("Paracetamol", 50, "01/02/2030").unwrap();
///
/// // A second insert under the same name is rejected
/// let err = inv.insert("Paracetamol", 10, "01/02/2031").unwrap_err();
/// assert!(matches!(err, InventoryError::Duplicate { .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    records: Vec<StockRecord>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from records, re-checking the invariants.
    ///
    /// Used when loading persisted data: every name must be non-empty and
    /// unique, every expiry must have the `MM/DD/YYYY` shape.
    pub fn from_records(records: Vec<StockRecord>) -> Result<Self, InventoryError> {
        let mut inv = Self::new();
        for record in records {
            if record.name.is_empty() {
                return Err(InventoryError::Validation(ValidationFailure::EmptyName));
            }
            if !expiry::is_valid_shape(&record.expiry) {
                return Err(InventoryError::Validation(
                    ValidationFailure::BadExpiryShape,
                ));
            }
            if inv.get(&record.name).is_some() {
                return Err(InventoryError::Duplicate { name: record.name });
            }
            inv.records.push(record);
        }
        Ok(inv)
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    /// Check if the inventory has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Look up a record by name (case-sensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut StockRecord> {
        self.records.iter_mut().find(|r| r.name == name)
    }

    /// Insert a new record.
    ///
    /// The name must be non-empty, the quantity positive, and the expiry in
    /// `MM/DD/YYYY` shape; violations are [`InventoryError::Validation`].
    /// An already-stocked name is [`InventoryError::Duplicate`].
    pub fn insert(&mut self, name: &str, quantity: u32, expiry: &str) -> Result<(), InventoryError> {
        if name.is_empty() {
            return Err(InventoryError::Validation(ValidationFailure::EmptyName));
        }
        if quantity == 0 {
            return Err(InventoryError::Validation(ValidationFailure::ZeroQuantity));
        }
        if !expiry::is_valid_shape(expiry) {
            return Err(InventoryError::Validation(
                ValidationFailure::BadExpiryShape,
            ));
        }
        if self.get(name).is_some() {
            return Err(InventoryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.records.push(StockRecord::new(name, quantity, expiry));
        Ok(())
    }

    /// Replace the quantity and/or expiry of an existing record.
    ///
    /// Omitted fields are left unchanged. A supplied quantity may be zero
    /// (stock can be zeroed out); a supplied expiry must have the
    /// `MM/DD/YYYY` shape, same rule as [`Self::insert`].
    pub fn update(
        &mut self,
        name: &str,
        quantity: Option<u32>,
        expiry: Option<&str>,
    ) -> Result<(), InventoryError> {
        if let Some(new_expiry) = expiry {
            if !expiry::is_valid_shape(new_expiry) {
                return Err(InventoryError::Validation(
                    ValidationFailure::BadExpiryShape,
                ));
            }
        }
        let record = self.get_mut(name).ok_or_else(|| InventoryError::NotFound {
            name: name.to_string(),
        })?;
        if let Some(new_quantity) = quantity {
            record.quantity = new_quantity;
        }
        if let Some(new_expiry) = expiry {
            record.expiry = new_expiry.to_string();
        }
        Ok(())
    }

    /// Decrement a record's quantity by `quantity` units.
    ///
    /// Returns the remaining quantity. An unknown name, a zero quantity, or
    /// a request exceeding the units on hand is
    /// [`InventoryError::InvalidRequest`], with no distinction between the
    /// three causes.
    pub fn withdraw(&mut self, name: &str, quantity: u32) -> Result<u32, InventoryError> {
        let record = match self.get_mut(name) {
            Some(r) if quantity > 0 && quantity <= r.quantity => r,
            _ => return Err(InventoryError::InvalidRequest),
        };
        record.quantity -= quantity;
        Ok(record.quantity)
    }

    /// Remove a record by name.
    ///
    /// Returns whether a record was removed; removing an absent name is a
    /// no-op, not an error.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.name != name);
        self.records.len() != before
    }

    /// The stock listing, in insertion order, with expiries rendered.
    #[must_use]
    pub fn stock(&self) -> Vec<StockLine> {
        self.records
            .iter()
            .map(|r| StockLine {
                name: r.name.clone(),
                quantity: r.quantity,
                expiry: expiry::display_long(&r.expiry),
            })
            .collect()
    }
}
