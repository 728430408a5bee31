//! User ports: accounts and SMS verification codes.

use std::future::Future;

use storefront_domain::error::StorefrontError;
use storefront_domain::id::{AddressId, UserId};
use storefront_domain::user::{Credentials, NewUser, User};

/// Persistence for user accounts.
pub trait UserRepository {
    /// Number of users with this username (0 or 1).
    fn count_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<u64, StorefrontError>> + Send;

    /// Number of users with this mobile (0 or 1).
    fn count_by_mobile(
        &self,
        mobile: &str,
    ) -> impl Future<Output = Result<u64, StorefrontError>> + Send;

    /// Insert a new user.
    ///
    /// A username or mobile collision is reported as a validation error.
    fn create(&self, user: NewUser) -> impl Future<Output = Result<User, StorefrontError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, StorefrontError>> + Send;

    /// Find a user by username or mobile, with the stored password hash.
    fn find_credentials(
        &self,
        account: &str,
    ) -> impl Future<Output = Result<Option<Credentials>, StorefrontError>> + Send;

    /// Set an unverified email address.
    fn update_email(
        &self,
        id: UserId,
        email: &str,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;

    /// Mark the email active if it still equals `email`. Returns whether a
    /// row was updated.
    fn activate_email(
        &self,
        id: UserId,
        email: &str,
    ) -> impl Future<Output = Result<bool, StorefrontError>> + Send;

    /// Point the user's default address at `address` (or clear it).
    fn set_default_address(
        &self,
        id: UserId,
        address: Option<AddressId>,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;
}

/// Short-lived SMS verification codes keyed by mobile number.
pub trait VerificationCodeStore {
    /// The code last sent to `mobile`, if it has not expired.
    fn sms_code(
        &self,
        mobile: &str,
    ) -> impl Future<Output = Result<Option<String>, StorefrontError>> + Send;
}
