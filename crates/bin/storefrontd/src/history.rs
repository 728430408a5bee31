//! Runtime choice of the browsing history store.

use storefront_adapter_storage_redis::RedisHistoryStore;
use storefront_adapter_storage_sqlite_sqlx::history_store::SqliteHistoryStore;
use storefront_app::ports::HistoryStore;
use storefront_domain::error::StorefrontError;
use storefront_domain::history::HistoryLimit;
use storefront_domain::id::{SkuId, UserId};

/// The history store selected by `[history] backend`.
#[derive(Clone)]
pub enum HistoryBackend {
    Redis(RedisHistoryStore),
    Sqlite(SqliteHistoryStore),
}

impl HistoryStore for HistoryBackend {
    async fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> Result<(), StorefrontError> {
        match self {
            Self::Redis(store) => store.record(user, sku, limit).await,
            Self::Sqlite(store) => store.record(user, sku, limit).await,
        }
    }

    async fn list(&self, user: UserId, limit: HistoryLimit) -> Result<Vec<SkuId>, StorefrontError> {
        match self {
            Self::Redis(store) => store.list(user, limit).await,
            Self::Sqlite(store) => store.list(user, limit).await,
        }
    }
}
