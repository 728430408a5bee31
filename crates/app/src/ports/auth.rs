//! Authentication collaborator ports: hashing, tokens, activation mail.
//!
//! The cryptography and delivery behind these traits belong to the
//! adapters; the application only sequences them.

use std::future::Future;

use storefront_domain::error::StorefrontError;
use storefront_domain::id::UserId;

/// One-way password hashing.
pub trait PasswordHasher {
    fn hash(&self, password: &str) -> impl Future<Output = Result<String, StorefrontError>> + Send;

    fn verify(
        &self,
        password: &str,
        hash: &str,
    ) -> impl Future<Output = Result<bool, StorefrontError>> + Send;
}

/// Issues and checks bearer tokens.
pub trait TokenIssuer {
    /// Token identifying `user` on authenticated requests.
    fn issue_access(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<String, StorefrontError>> + Send;

    /// Resolve an access token; `None` when unknown or expired.
    fn verify_access(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<UserId>, StorefrontError>> + Send;

    /// Token embedded in the email activation link.
    fn issue_email_verification(
        &self,
        user: UserId,
        email: &str,
    ) -> impl Future<Output = Result<String, StorefrontError>> + Send;

    /// Resolve an activation token to the user and the email it was issued
    /// for; `None` when unknown or expired.
    fn verify_email(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<(UserId, String)>, StorefrontError>> + Send;
}

/// Sends the email-activation message.
pub trait ActivationMailer {
    fn send_activation(
        &self,
        to: &str,
        verify_url: &str,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;
}
