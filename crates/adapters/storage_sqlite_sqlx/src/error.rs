//! Storage-specific error type wrapping sqlx errors.

use storefront_domain::error::StorefrontError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query, transaction, or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for StorefrontError {
    fn from(err: StorageError) -> Self {
        Self::store(err)
    }
}

/// Decode failure for a column holding an out-of-range value.
pub(crate) fn decode_error(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Unique-constraint violation on `table.column`, if that is what `err` is.
pub(crate) fn unique_violation(err: &sqlx::Error, column: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation() && db.message().contains(column),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_storage_error_to_store_unavailable() {
        let err: StorefrontError = StorageError::Database(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, StorefrontError::StoreUnavailable(_)));
    }

    #[test]
    fn should_not_treat_other_errors_as_unique_violation() {
        assert!(!unique_violation(&sqlx::Error::RowNotFound, "users.username"));
    }
}
