//! Catalog ports: SKU lookups, category listings, and search.

use std::future::Future;

use storefront_domain::catalog::{Page, Paginated, SkuOrdering};
use storefront_domain::error::StorefrontError;
use storefront_domain::id::{CategoryId, SkuId};
use storefront_domain::sku::Sku;

/// Read access to SKUs.
pub trait SkuRepository {
    /// Get a SKU by id.
    fn get_by_id(
        &self,
        id: SkuId,
    ) -> impl Future<Output = Result<Option<Sku>, StorefrontError>> + Send;

    /// Whether a SKU with this id exists.
    fn exists(&self, id: SkuId) -> impl Future<Output = Result<bool, StorefrontError>> + Send;

    /// Fetch several SKUs at once. Order of the result is unspecified and
    /// missing ids are simply absent.
    fn get_many(
        &self,
        ids: &[SkuId],
    ) -> impl Future<Output = Result<Vec<Sku>, StorefrontError>> + Send;

    /// Launched SKUs of a category, sorted and paginated.
    fn list_by_category(
        &self,
        category: CategoryId,
        ordering: SkuOrdering,
        page: Page,
    ) -> impl Future<Output = Result<Paginated<Sku>, StorefrontError>> + Send;
}

/// Full-text search over launched SKUs.
pub trait SearchIndex {
    /// Find SKUs matching `text`, best matches first.
    fn search(
        &self,
        text: &str,
        page: Page,
    ) -> impl Future<Output = Result<Paginated<Sku>, StorefrontError>> + Send;
}
