//! Redis-specific error type.

use std::time::Duration;

use storefront_domain::error::StorefrontError;

/// Errors originating from the Redis adapter.
#[derive(Debug, thiserror::Error)]
pub enum RedisStoreError {
    /// Connection, protocol, or `EXEC` failure.
    #[error("redis command failed")]
    Command(#[from] redis::RedisError),

    /// The command did not complete in time.
    #[error("redis command timed out after {0:?}")]
    Timeout(Duration),

    /// A stored value could not be decoded.
    #[error("unexpected value stored under {key}")]
    Corrupt { key: String },
}

impl From<RedisStoreError> for StorefrontError {
    fn from(err: RedisStoreError) -> Self {
        Self::store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_timeout_as_store_unavailable() {
        let err: StorefrontError = RedisStoreError::Timeout(Duration::from_millis(250)).into();
        assert!(matches!(err, StorefrontError::StoreUnavailable(_)));
    }

    #[test]
    fn should_name_corrupt_key() {
        let err = RedisStoreError::Corrupt {
            key: "history_1".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected value stored under history_1");
    }
}
