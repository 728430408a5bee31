//! History service: record and read back a user's recently viewed SKUs.

use std::collections::HashMap;

use storefront_domain::error::{StorefrontError, ValidationError};
use storefront_domain::history::{BrowsingHistory, HistoryLimit};
use storefront_domain::id::{SkuId, UserId};
use storefront_domain::sku::SkuView;

use crate::ports::{HistoryStore, SkuRepository};

/// Application service for browsing histories.
///
/// Holds no lock of its own: atomicity of [`record`](Self::record) is the
/// store's job, so concurrent calls for one user are serialised there.
pub struct HistoryService<H, S> {
    store: H,
    skus: S,
    limit: HistoryLimit,
}

impl<H: HistoryStore, S: SkuRepository> HistoryService<H, S> {
    /// Create a new service over `store`, checking SKUs against `skus`.
    pub fn new(store: H, skus: S, limit: HistoryLimit) -> Self {
        Self {
            store,
            skus,
            limit,
        }
    }

    /// Configured capacity of each user's history.
    #[must_use]
    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Record that `user` viewed `sku`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSku`] when the SKU does not exist,
    /// or [`StorefrontError::StoreUnavailable`] when the store fails; in that
    /// case the stored list is unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn record(&self, user: UserId, sku: SkuId) -> Result<(), StorefrontError> {
        if !self.skus.exists(sku).await? {
            return Err(ValidationError::UnknownSku(sku).into());
        }
        self.store.record(user, sku, self.limit).await
    }

    /// The user's history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StoreUnavailable`] when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, user: UserId) -> Result<BrowsingHistory, StorefrontError> {
        let stored = self.store.list(user, self.limit).await?;
        Ok(BrowsingHistory::from_stored(stored, self.limit))
    }

    /// The user's history resolved to SKU views, most recent first.
    ///
    /// SKUs removed from the catalog since they were viewed are skipped.
    ///
    /// # Errors
    ///
    /// Propagates store and catalog failures.
    #[tracing::instrument(skip(self))]
    pub async fn list_views(&self, user: UserId) -> Result<Vec<SkuView>, StorefrontError> {
        let history = self.list(user).await?;
        if history.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: HashMap<SkuId, SkuView> = self
            .skus
            .get_many(history.items())
            .await?
            .into_iter()
            .map(|sku| (sku.id, sku.view()))
            .collect();

        let views: Vec<SkuView> = history
            .items()
            .iter()
            .filter_map(|id| found.remove(id))
            .collect();
        if views.len() < history.len() {
            tracing::debug!(
                missing = history.len() - views.len(),
                "history references SKUs no longer in the catalog"
            );
        }
        Ok(views)
    }
}
