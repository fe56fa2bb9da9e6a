//! Repository implementations for database access
//!
//! - Inserts use ON CONFLICT DO NOTHING (no check-then-insert)
//! - Month filters compare the `MM` slice of `dateOfSale` as text

pub mod transactions;

pub use transactions::{DbError, InsertOutcome, TransactionRepo};
