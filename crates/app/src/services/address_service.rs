//! Address service: a user's address book with a default entry.

use storefront_domain::address::{Address, AddressBook, AddressDraft};
use storefront_domain::error::{NotFoundError, StorefrontError, ValidationError};
use storefront_domain::id::{AddressId, UserId};

use crate::ports::{AddressRepository, UserRepository};

/// Default cap on non-deleted addresses per user.
pub const DEFAULT_ADDRESS_LIMIT: usize = 20;

fn not_found(id: AddressId) -> StorefrontError {
    NotFoundError {
        entity: "Address",
        id: id.to_string(),
    }
    .into()
}

/// Application service for address books.
pub struct AddressService<A, U> {
    addresses: A,
    users: U,
    limit: usize,
}

impl<A: AddressRepository, U: UserRepository> AddressService<A, U> {
    /// Create a new service allowing at most `limit` addresses per user.
    pub fn new(addresses: A, users: U, limit: usize) -> Self {
        Self {
            addresses,
            users,
            limit,
        }
    }

    /// Add an address to the user's book.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AddressLimitReached`] when the book is full,
    /// or a validation error for a malformed draft.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create(
        &self,
        user: UserId,
        draft: AddressDraft,
    ) -> Result<Address, StorefrontError> {
        let draft = draft.validated()?;
        if self.addresses.count_active(user).await? >= self.limit {
            return Err(ValidationError::AddressLimitReached(self.limit).into());
        }
        let address = self.addresses.create(user, draft).await?;
        tracing::debug!(address_id = %address.id, "address created");
        Ok(address)
    }

    /// The user's non-deleted addresses with the default id and the limit.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list(&self, user: UserId) -> Result<AddressBook, StorefrontError> {
        let addresses = self.addresses.list_active(user).await?;
        let default_address_id = self
            .users
            .get_by_id(user)
            .await?
            .and_then(|u| u.default_address_id);
        Ok(AddressBook {
            user_id: user,
            default_address_id,
            limit: self.limit,
            addresses,
        })
    }

    /// Replace every field of an address.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when the address is missing,
    /// deleted, or owned by someone else.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update(
        &self,
        user: UserId,
        id: AddressId,
        draft: AddressDraft,
    ) -> Result<Address, StorefrontError> {
        let draft = draft.validated()?;
        self.addresses
            .update(user, id, draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Soft-delete an address, clearing the default if it pointed there.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when the address is missing.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user: UserId, id: AddressId) -> Result<(), StorefrontError> {
        if !self.addresses.soft_delete(user, id).await? {
            return Err(not_found(id));
        }
        let was_default = self
            .users
            .get_by_id(user)
            .await?
            .is_some_and(|u| u.default_address_id == Some(id));
        if was_default {
            self.users.set_default_address(user, None).await?;
        }
        Ok(())
    }

    /// Make an address the user's default.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when the address is missing.
    #[tracing::instrument(skip(self))]
    pub async fn set_default(&self, user: UserId, id: AddressId) -> Result<(), StorefrontError> {
        if self.addresses.get(user, id).await?.is_none() {
            return Err(not_found(id));
        }
        self.users.set_default_address(user, Some(id)).await
    }

    /// Rename an address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for a blank title, or
    /// [`StorefrontError::NotFound`] when the address is missing.
    pub async fn update_title(
        &self,
        user: UserId,
        id: AddressId,
        title: &str,
    ) -> Result<(), StorefrontError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        if !self.addresses.update_title(user, id, title).await? {
            return Err(not_found(id));
        }
        Ok(())
    }
}
