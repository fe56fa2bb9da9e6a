//! Database layer - connection pool, schema and repository
//!
//! - One `SqlitePool`, owned by the caller and passed down explicitly
//! - Every query binds its inputs; no user text is spliced into SQL
//! - Aggregation happens in SQL, one statement per endpoint

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{DbError, InsertOutcome, TransactionRepo};
pub use schema::ensure_schema;
