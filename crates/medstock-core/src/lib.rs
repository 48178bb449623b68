//! Core types for medstock
//!
//! This crate provides the fundamental types used throughout the medstock
//! project:
//!
//! - [`StockRecord`] - One stocked item: quantity on hand plus expiry date
//! - [`Inventory`] - An insertion-ordered collection of stock records
//! - [`WithdrawalEntry`] - One audit-log line for a withdrawal
//!
//! Everything here is pure in-memory data and validation; persistence lives
//! in `medstock-store`.
//!
//! # Example
//!
//! ```
//! use medstock_core::Inventory;
//!
//! let mut inv = Inventory::new();
//! inv.insert("Paracetamol", 50, "01/02/2030").unwrap();
//!
//! // Withdraw ten tablets
//! let remaining = inv.withdraw("Paracetamol", 10).unwrap();
//! assert_eq!(remaining, 40);
//!
//! // The stock listing renders the expiry in long form
//! let lines = inv.stock();
//! assert_eq!(lines[0].expiry, "January 02, 2030");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod expiry;
pub mod inventory;
pub mod record;

pub use inventory::{Inventory, InventoryError, StockLine, ValidationFailure};
pub use record::{StockRecord, WithdrawalEntry};

// Re-export commonly used external types
pub use chrono::NaiveDateTime;
