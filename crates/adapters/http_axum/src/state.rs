//! Shared application state for axum handlers.

use std::sync::Arc;

use storefront_app::ports::{
    ActivationMailer, AddressRepository, HistoryStore, PasswordHasher, SearchIndex,
    SkuRepository, TokenIssuer, UserRepository, VerificationCodeStore,
};
use storefront_app::services::address_service::AddressService;
use storefront_app::services::catalog_service::CatalogService;
use storefront_app::services::history_service::HistoryService;
use storefront_app::services::user_service::UserService;

/// The set of port implementations the HTTP layer is wired against.
///
/// Implemented by a marker type in the composition root, so handlers stay
/// generic without one type parameter per port.
pub trait Backend: Send + Sync + 'static {
    type History: HistoryStore + Send + Sync + 'static;
    type Skus: SkuRepository + SearchIndex + Send + Sync + 'static;
    type Users: UserRepository + Send + Sync + 'static;
    type Addresses: AddressRepository + Send + Sync + 'static;
    type Codes: VerificationCodeStore + Send + Sync + 'static;
    type Hasher: PasswordHasher + Send + Sync + 'static;
    type Tokens: TokenIssuer + Send + Sync + 'static;
    type Mailer: ActivationMailer + Send + Sync + 'static;
}

pub type HistoryServiceOf<B> = HistoryService<<B as Backend>::History, <B as Backend>::Skus>;
pub type CatalogServiceOf<B> = CatalogService<<B as Backend>::Skus>;
pub type UserServiceOf<B> = UserService<
    <B as Backend>::Users,
    <B as Backend>::Codes,
    <B as Backend>::Hasher,
    <B as Backend>::Tokens,
    <B as Backend>::Mailer,
>;
pub type AddressServiceOf<B> = AddressService<<B as Backend>::Addresses, <B as Backend>::Users>;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<B: Backend> {
    /// Browsing history use-cases.
    pub history: Arc<HistoryServiceOf<B>>,
    /// Catalog listing and search.
    pub catalog: Arc<CatalogServiceOf<B>>,
    /// Accounts and authentication.
    pub users: Arc<UserServiceOf<B>>,
    /// Address books.
    pub addresses: Arc<AddressServiceOf<B>>,
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            addresses: Arc::clone(&self.addresses),
        }
    }
}

impl<B: Backend> AppState<B> {
    /// Create a new application state from service instances.
    pub fn new(
        history: HistoryServiceOf<B>,
        catalog: CatalogServiceOf<B>,
        users: UserServiceOf<B>,
        addresses: AddressServiceOf<B>,
    ) -> Self {
        Self {
            history: Arc::new(history),
            catalog: Arc::new(catalog),
            users: Arc::new(users),
            addresses: Arc::new(addresses),
        }
    }
}
