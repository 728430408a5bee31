//! History store port: per-user recency lists with atomic updates.

use std::future::Future;

use storefront_domain::error::StorefrontError;
use storefront_domain::history::HistoryLimit;
use storefront_domain::id::{SkuId, UserId};

/// Backing store for browsing histories.
///
/// Implementations must apply [`record`](Self::record) as one indivisible
/// batch: concurrent calls for the same user never interleave, and a failed
/// or timed-out call leaves the stored list untouched. Correctness must come
/// from the store's own atomic primitive (transaction, `MULTI`/`EXEC`,
/// script), never from a lock held by the application.
pub trait HistoryStore {
    /// Remove every occurrence of `sku` from the user's list, push it to the
    /// front, and keep only the first `limit` entries.
    fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;

    /// Read up to `limit` ids, most recent first. Unknown users yield an
    /// empty list.
    fn list(
        &self,
        user: UserId,
        limit: HistoryLimit,
    ) -> impl Future<Output = Result<Vec<SkuId>, StorefrontError>> + Send;
}
