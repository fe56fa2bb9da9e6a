//! Table creation

use sqlx::SqlitePool;
use tracing::debug;

/// Name of the single table holding feed transactions.
pub const TRANSACTION_TABLE: &str = "transactionTable";

/// Create `transactionTable` if it does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactionTable (
            id INTEGER PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL,
            category VARCHAR(50) NOT NULL,
            image VARCHAR(255) NOT NULL,
            sold INTEGER NOT NULL CHECK (sold IN (0, 1)),
            dateOfSale TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    debug!(table = TRANSACTION_TABLE, "schema ready");
    Ok(())
}
