//! Redis implementation of [`HistoryStore`].
//!
//! Each user's history is a list under `history_{user_id}`, most recent at
//! the head. `record` sends `LREM`, `LPUSH` and `LTRIM` as one `MULTI`/`EXEC`
//! transaction, so Redis applies the three steps without interleaving.

use storefront_app::ports::HistoryStore;
use storefront_domain::error::StorefrontError;
use storefront_domain::history::HistoryLimit;
use storefront_domain::id::{SkuId, UserId};

use crate::config::RedisConnection;
use crate::error::RedisStoreError;
use crate::keys;

fn stop_index(limit: HistoryLimit) -> isize {
    isize::try_from(limit.last_index()).unwrap_or(isize::MAX)
}

/// `MULTI`, `LREM key 0 sku`, `LPUSH key sku`, `LTRIM key 0 limit-1`, `EXEC`.
fn record_pipeline(key: &str, sku: SkuId, limit: HistoryLimit) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .lrem(key, 0, sku.get())
        .ignore()
        .lpush(key, sku.get())
        .ignore()
        .ltrim(key, 0, stop_index(limit))
        .ignore();
    pipe
}

fn list_command(key: &str, limit: HistoryLimit) -> redis::Cmd {
    let mut cmd = redis::cmd("LRANGE");
    cmd.arg(key).arg(0).arg(stop_index(limit));
    cmd
}

/// Redis-backed browsing history store.
#[derive(Clone)]
pub struct RedisHistoryStore {
    conn: RedisConnection,
}

impl RedisHistoryStore {
    #[must_use]
    pub fn new(conn: RedisConnection) -> Self {
        Self { conn }
    }
}

impl HistoryStore for RedisHistoryStore {
    async fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> Result<(), StorefrontError> {
        let pipe = record_pipeline(&keys::history(user), sku, limit);
        let mut conn = self.conn.manager();
        self.conn
            .bounded::<()>(pipe.query_async(&mut conn))
            .await
            .inspect_err(|err| tracing::warn!(error = %err, %user, "history batch failed"))?;
        Ok(())
    }

    async fn list(&self, user: UserId, limit: HistoryLimit) -> Result<Vec<SkuId>, StorefrontError> {
        let key = keys::history(user);
        let mut conn = self.conn.manager();
        let raw: Vec<i64> = self
            .conn
            .bounded(list_command(&key, limit).query_async(&mut conn))
            .await?;

        raw.into_iter()
            .map(|id| SkuId::new(id).map_err(|_| RedisStoreError::Corrupt { key: key.clone() }))
            .collect::<Result<_, _>>()
            .map_err(StorefrontError::from)
    }
}
