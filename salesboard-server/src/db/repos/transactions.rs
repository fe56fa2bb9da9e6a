//! Transaction repository
//!
//! Write path: insert-or-ignore by feed `id`.
//! Read path: list, search, and the three monthly aggregates.

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{
    CategoryCount, CombinedData, Month, Pagination, PriceBucket, Statistics, Transaction,
    PRICE_RANGES,
};

const COLUMNS: &str = "id, title, price, description, category, image, sold, dateOfSale";

/// Characters 6-7 of `YYYY-MM-DD...`, read as written in the feed.
const MONTH_OF_SALE: &str = "substr(dateOfSale, 6, 2)";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result of a single insert-or-ignore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Transaction repository
pub struct TransactionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TransactionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a transaction unless its id is already stored.
    pub async fn insert_or_ignore(&self, txn: &Transaction) -> Result<InsertOutcome, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactionTable
                (id, title, price, description, category, image, sold, dateOfSale)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(txn.id)
        .bind(&txn.title)
        .bind(txn.price)
        .bind(&txn.description)
        .bind(&txn.category)
        .bind(&txn.image)
        .bind(txn.sold)
        .bind(&txn.date_of_sale)
        .execute(self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            InsertOutcome::Duplicate
        } else {
            InsertOutcome::Inserted
        })
    }

    /// Every stored row, in whatever order SQLite returns them.
    pub async fn list_all(&self) -> Result<Vec<Transaction>, DbError> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactionTable"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// One page of rows whose title, description or price contains `text`,
    /// ordered by id. An empty `text` matches every row.
    ///
    /// Matching uses `LIKE`, so it is case-insensitive for ASCII only.
    pub async fn search(&self, text: &str, page: Pagination) -> Result<Vec<Transaction>, DbError> {
        if text.is_empty() {
            let rows = sqlx::query_as::<_, Transaction>(&format!(
                "SELECT {COLUMNS} FROM transactionTable ORDER BY id ASC LIMIT ? OFFSET ?"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;
            return Ok(rows);
        }

        let pattern = format!("%{}%", escape_like(text));
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {COLUMNS} FROM transactionTable
            WHERE title LIKE ?1 ESCAPE '\'
               OR description LIKE ?1 ESCAPE '\'
               OR CAST(price AS TEXT) LIKE ?1 ESCAPE '\'
            ORDER BY id ASC
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Total rows stored.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactionTable")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Rows sold (or not) in `month`, any year.
    pub async fn count_in_month(&self, month: Month) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM transactionTable WHERE {MONTH_OF_SALE} = ?"
        ))
        .bind(month.key())
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Sale amount over sold rows, plus sold / unsold counts, for `month`.
    pub async fn statistics(&self, month: Month) -> Result<Statistics, DbError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN sold = 1 THEN price END), 0.0) AS total_sale_amount,
                COUNT(CASE WHEN sold = 1 THEN 1 END) AS total_sold,
                COUNT(CASE WHEN sold = 0 THEN 1 END) AS total_not_sold
            FROM transactionTable
            WHERE {MONTH_OF_SALE} = ?
            "#
        ))
        .bind(month.key())
        .fetch_one(self.pool)
        .await?;

        let amount: f64 = row.try_get("total_sale_amount")?;
        Ok(Statistics {
            total_sale_amount: round_cents(amount),
            total_sold: row.try_get("total_sold")?,
            total_not_sold: row.try_get("total_not_sold")?,
        })
    }

    /// Count of rows in `month` per price range, all ten ranges present.
    pub async fn bar_chart(&self, month: Month) -> Result<Vec<PriceBucket>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT ");
        for (idx, range) in PRICE_RANGES.iter().enumerate() {
            if idx > 0 {
                query.push(", ");
            }
            let (lower, inclusive) = range.lower_bound();
            query
                .push(if inclusive {
                    "COUNT(CASE WHEN price >= "
                } else {
                    "COUNT(CASE WHEN price > "
                })
                .push_bind(lower)
                .push(" AND price <= ")
                .push_bind(range.upper_bound())
                .push(" THEN 1 END)");
        }
        query
            .push(" FROM transactionTable WHERE ")
            .push(MONTH_OF_SALE)
            .push(" = ")
            .push_bind(month.key());

        let row = query.build().fetch_one(self.pool).await?;

        PRICE_RANGES
            .iter()
            .enumerate()
            .map(|(idx, range)| -> Result<PriceBucket, DbError> {
                Ok(PriceBucket {
                    range: range.label(),
                    count: row.try_get::<i64, _>(idx)?,
                })
            })
            .collect()
    }

    /// Count of rows in `month` per category. Categories with no rows in the
    /// month are absent.
    pub async fn pie_chart(&self, month: Month) -> Result<Vec<CategoryCount>, DbError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
            r#"
            SELECT category, COUNT(*) AS count
            FROM transactionTable
            WHERE {MONTH_OF_SALE} = ?
            GROUP BY category
            ORDER BY category
            "#
        ))
        .bind(month.key())
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    /// Statistics, bar chart and pie chart for `month`, queried concurrently.
    /// Fails as a whole if any one of them fails.
    pub async fn combined(&self, month: Month) -> Result<CombinedData, DbError> {
        let (total_statistics, bar_chart_data, pie_chart_data) = tokio::try_join!(
            self.statistics(month),
            self.bar_chart(month),
            self.pie_chart(month),
        )?;

        Ok(CombinedData {
            total_statistics,
            bar_chart_data,
            pie_chart_data,
        })
    }
}

/// Escape `LIKE` wildcards so user text matches literally under `ESCAPE '\'`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
