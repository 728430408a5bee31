//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StorefrontError`] via `From` at the port boundary.

use crate::id::SkuId;

/// Boxed source error carried by infrastructure failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// The request was rejected; retrying it unchanged will fail again.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist (or belongs to someone else).
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Missing, expired, or unknown credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// A backing store could not be reached, timed out, or rejected a batch.
    ///
    /// Transient: callers may retry with backoff. Atomic operations never
    /// leave a partial mutation behind when this is returned.
    #[error("store unavailable")]
    StoreUnavailable(#[source] BoxError),

    /// An external collaborator (hashing, mail, page publishing) failed.
    #[error("upstream failure")]
    Upstream(#[source] BoxError),
}

impl StorefrontError {
    /// Wrap an infrastructure error as [`StorefrontError::StoreUnavailable`].
    pub fn store(err: impl Into<BoxError>) -> Self {
        Self::StoreUnavailable(err.into())
    }

    /// Wrap a collaborator error as [`StorefrontError::Upstream`].
    pub fn upstream(err: impl Into<BoxError>) -> Self {
        Self::Upstream(err.into())
    }
}

/// Invariant violations and rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must be a positive integer, got {0:?}")]
    InvalidId(String),

    #[error("sku {0} does not exist")]
    UnknownSku(SkuId),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("invalid mobile number {0:?}")]
    InvalidMobile(String),

    #[error("invalid email address {0:?}")]
    InvalidEmail(String),

    #[error("the user agreement must be accepted")]
    AgreementNotAccepted,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("sms verification code expired or never sent")]
    SmsCodeExpired,

    #[error("sms verification code does not match")]
    SmsCodeMismatch,

    #[error("username {0:?} is already taken")]
    UsernameTaken(String),

    #[error("mobile {0:?} is already registered")]
    MobileTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("email verification link is invalid or expired")]
    InvalidVerificationToken,

    #[error("address limit of {0} reached")]
    AddressLimitReached(usize),

    #[error("unsupported ordering {0:?}")]
    InvalidOrdering(String),

    #[error("page must be at least 1 and page_size between 1 and {max_page_size}")]
    InvalidPage { max_page_size: u32 },

    #[error("history limit must be at least 1")]
    InvalidHistoryLimit,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_missing_sku_in_message() {
        let err = ValidationError::UnknownSku(SkuId::new(42).unwrap());
        assert_eq!(err.to_string(), "sku 42 does not exist");
    }

    #[test]
    fn should_convert_validation_error_into_storefront_error() {
        let err: StorefrontError = ValidationError::PasswordMismatch.into();
        assert!(matches!(
            err,
            StorefrontError::Validation(ValidationError::PasswordMismatch)
        ));
    }

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Sku",
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Sku 7 not found");
    }

    #[test]
    fn should_keep_source_when_wrapping_store_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StorefrontError::store(io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refused");
    }
}
