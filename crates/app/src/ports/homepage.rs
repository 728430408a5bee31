//! Homepage ports: source rows and static page publishing.

use std::future::Future;

use storefront_domain::error::StorefrontError;
use storefront_domain::homepage::{Category, Channel, Content, Homepage};

/// Read access to the data the homepage is built from.
pub trait HomepageSource {
    fn channels(&self) -> impl Future<Output = Result<Vec<Channel>, StorefrontError>> + Send;

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, StorefrontError>> + Send;

    fn contents(&self) -> impl Future<Output = Result<Vec<Content>, StorefrontError>> + Send;
}

/// Renders and stores the static homepage.
pub trait PagePublisher {
    fn publish(
        &self,
        homepage: &Homepage,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;
}
