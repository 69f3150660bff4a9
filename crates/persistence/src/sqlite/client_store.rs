//! Key/value rows of the `client_store` table

use chrono::{DateTime, Utc};
use loyalty_core::{Error, Result};
use sqlx::SqlitePool;

/// A stored value and when it was last written
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Read one key
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<StoredValue>> {
    sqlx::query_as::<_, StoredValue>(
        r#"
        SELECT value, updated_at
        FROM client_store
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))
}

/// Write one key, replacing whatever was there
pub async fn put_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO client_store (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Remove one key; returns whether it existed
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM client_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}
