//! `SQLite` implementation of [`HistoryStore`].
//!
//! One row per (user, sku); the autoincrement row id orders a user's entries
//! by recency. `record` runs its three statements in one transaction.

use sqlx::SqlitePool;

use storefront_app::ports::HistoryStore;
use storefront_domain::error::StorefrontError;
use storefront_domain::history::HistoryLimit;
use storefront_domain::id::{SkuId, UserId};

use crate::codec::decode_id;
use crate::error::StorageError;

const DELETE_ENTRY: &str = "DELETE FROM browsing_history WHERE user_id = ? AND sku_id = ?";
const INSERT_ENTRY: &str = "INSERT INTO browsing_history (user_id, sku_id) VALUES (?, ?)";
const TRIM: &str = r"
    DELETE FROM browsing_history
    WHERE user_id = ?1 AND id NOT IN (
        SELECT id FROM browsing_history WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2
    )
";
const SELECT_RECENT: &str =
    "SELECT sku_id FROM browsing_history WHERE user_id = ? ORDER BY id DESC LIMIT ?";

fn limit_param(limit: HistoryLimit) -> i64 {
    i64::try_from(limit.get()).unwrap_or(i64::MAX)
}

/// `SQLite`-backed browsing history store.
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HistoryStore for SqliteHistoryStore {
    async fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> Result<(), StorefrontError> {
        // Dropping `tx` on any error path rolls the batch back.
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(DELETE_ENTRY)
            .bind(user.get())
            .bind(sku.get())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        sqlx::query(INSERT_ENTRY)
            .bind(user.get())
            .bind(sku.get())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        sqlx::query(TRIM)
            .bind(user.get())
            .bind(limit_param(limit))
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn list(&self, user: UserId, limit: HistoryLimit) -> Result<Vec<SkuId>, StorefrontError> {
        let rows: Vec<i64> = sqlx::query_scalar(SELECT_RECENT)
            .bind(user.get())
            .bind(limit_param(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|raw| decode_id(raw).map_err(|err| StorageError::from(err).into()))
            .collect()
    }
}
