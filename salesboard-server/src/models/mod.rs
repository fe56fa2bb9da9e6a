//! Domain models
//!
//! Feed records are validated when they are parsed; query parameters are
//! parsed leniently and fall back to their defaults.

pub mod charts;
pub mod month;
pub mod pagination;
pub mod transaction;
pub mod validation;

pub use charts::{CategoryCount, CombinedData, PriceBucket, PriceRange, Statistics, PRICE_RANGES};
pub use month::{Month, MonthParams};
pub use pagination::{Pagination, SearchParams};
pub use transaction::Transaction;
pub use validation::ValidationError;
