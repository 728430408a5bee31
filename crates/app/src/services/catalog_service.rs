//! Catalog service: SKU lookup, category listings, and search.

use storefront_domain::catalog::{Page, Paginated, SkuOrdering};
use storefront_domain::error::{NotFoundError, StorefrontError, ValidationError};
use storefront_domain::id::{CategoryId, SkuId};
use storefront_domain::sku::{Sku, SkuView};

use crate::ports::{SearchIndex, SkuRepository};

/// Application service for browsing the catalog.
pub struct CatalogService<R> {
    repo: R,
}

impl<R: SkuRepository + SearchIndex> CatalogService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a SKU by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when no SKU with `id` exists,
    /// or a store error from the repository.
    pub async fn get_sku(&self, id: SkuId) -> Result<Sku, StorefrontError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Sku",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Launched SKUs of a category.
    ///
    /// # Errors
    ///
    /// Returns a store error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_category(
        &self,
        category: CategoryId,
        ordering: SkuOrdering,
        page: Page,
    ) -> Result<Paginated<SkuView>, StorefrontError> {
        let found = self.repo.list_by_category(category, ordering, page).await?;
        Ok(found.map(|sku| sku.view()))
    }

    /// Search launched SKUs by name or caption.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for blank `text`, or a store
    /// error from the index.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        text: &str,
        page: Page,
    ) -> Result<Paginated<SkuView>, StorefrontError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyField { field: "text" }.into());
        }
        let found = self.repo.search(text, page).await?;
        Ok(found.map(|sku| sku.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{InMemorySkuRepo, sku};

    fn make_service() -> CatalogService<InMemorySkuRepo> {
        let mut skus: Vec<Sku> = (1..=6).map(|n| sku(n, 1)).collect();
        skus.push(sku(7, 2));
        skus[5].is_launched = false;
        CatalogService::new(InMemorySkuRepo::with(skus))
    }

    fn category(raw: i64) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn should_return_not_found_when_sku_missing() {
        let svc = make_service();
        let result = svc.get_sku(SkuId::new(99).unwrap()).await;
        assert!(matches!(result, Err(StorefrontError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_only_launched_skus_of_category() {
        let svc = make_service();
        let page = svc
            .list_category(category(1), SkuOrdering::default(), Page::default())
            .await
            .unwrap();
        assert_eq!(page.count, 5);
        let ids: Vec<i64> = page.results.iter().map(|v| v.id.get()).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn should_order_by_price_ascending_and_paginate() {
        let svc = make_service();
        let page = svc
            .list_category(
                category(1),
                "price".parse().unwrap(),
                Page::new(Some(2), Some(2)).unwrap(),
            )
            .await
            .unwrap();
        let ids: Vec<i64> = page.results.iter().map(|v| v.id.get()).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.count, 5);
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn should_reject_blank_search_text() {
        let svc = make_service();
        let result = svc.search("   ", Page::default()).await;
        assert!(matches!(
            result,
            Err(StorefrontError::Validation(ValidationError::EmptyField {
                field: "text"
            }))
        ));
    }

    #[tokio::test]
    async fn should_search_by_name() {
        let svc = make_service();
        let page = svc.search("sku 7", Page::default()).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].id.get(), 7);
    }
}
