//! Address repository port.

use std::future::Future;

use storefront_domain::address::{Address, AddressDraft};
use storefront_domain::error::StorefrontError;
use storefront_domain::id::{AddressId, UserId};

/// Persistence for user addresses. Deleted addresses are kept but hidden
/// from every query.
pub trait AddressRepository {
    /// Number of non-deleted addresses of a user.
    fn count_active(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<usize, StorefrontError>> + Send;

    fn create(
        &self,
        user: UserId,
        draft: AddressDraft,
    ) -> impl Future<Output = Result<Address, StorefrontError>> + Send;

    /// Non-deleted addresses of a user, oldest first.
    fn list_active(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Address>, StorefrontError>> + Send;

    /// A non-deleted address owned by `user`.
    fn get(
        &self,
        user: UserId,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, StorefrontError>> + Send;

    /// Overwrite all fields. Returns `None` when the address is not found.
    fn update(
        &self,
        user: UserId,
        id: AddressId,
        draft: AddressDraft,
    ) -> impl Future<Output = Result<Option<Address>, StorefrontError>> + Send;

    /// Flag an address deleted. Returns whether it existed.
    fn soft_delete(
        &self,
        user: UserId,
        id: AddressId,
    ) -> impl Future<Output = Result<bool, StorefrontError>> + Send;

    /// Rename an address. Returns whether it existed.
    fn update_title(
        &self,
        user: UserId,
        id: AddressId,
        title: &str,
    ) -> impl Future<Output = Result<bool, StorefrontError>> + Send;
}
