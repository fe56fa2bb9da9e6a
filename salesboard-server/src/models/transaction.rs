//! Transaction record, as stored and as served

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// One product sale from the feed. The feed assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(deserialize_with = "bool_or_int")]
    pub sold: bool,
    #[sqlx(rename = "dateOfSale")]
    pub date_of_sale: String,
}

impl Transaction {
    /// Parse one element of the feed array.
    pub fn from_feed(value: serde_json::Value) -> Result<Self, ValidationError> {
        let txn: Self = serde_json::from_value(value).map_err(|e| ValidationError::Malformed {
            field: "record",
            reason: e.to_string(),
        })?;
        txn.validate()?;
        Ok(txn)
    }

    /// Month-based queries slice `dateOfSale` as text, so it has to be a
    /// real date laid out as `YYYY-MM-DD...`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice { field: "price" });
        }
        sale_date(&self.date_of_sale).ok_or_else(|| ValidationError::InvalidDate {
            field: "dateOfSale",
            value: self.date_of_sale.clone(),
        })?;
        Ok(())
    }
}

/// Calendar date of the sale, as written in the feed (no timezone shift).
fn sale_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// The feed sends `sold` as a JSON bool; older dumps use 0/1.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(serde::de::Error::custom(format!(
            "sold must be 0 or 1, got {n}"
        ))),
    }
}
