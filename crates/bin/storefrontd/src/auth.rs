//! Password hashing and activation mail delivery for the daemon.

use storefront_app::ports::{ActivationMailer, PasswordHasher};
use storefront_domain::error::StorefrontError;

/// bcrypt hashing on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, StorefrontError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(StorefrontError::upstream)?
            .map_err(StorefrontError::upstream)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, StorefrontError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(StorefrontError::upstream)?;
        match outcome {
            Ok(matches) => Ok(matches),
            // A corrupt stored hash reads as a failed login.
            Err(err) => {
                tracing::warn!(error = %err, "unreadable password hash");
                Ok(false)
            }
        }
    }
}

/// Writes activation links to the log instead of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl ActivationMailer for LogMailer {
    async fn send_activation(&self, to: &str, verify_url: &str) -> Result<(), StorefrontError> {
        tracing::info!(to, verify_url, "activation mail");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_verify_own_hash_only() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("s3cretpass").await.unwrap();

        assert_ne!(hash, "s3cretpass");
        assert!(hasher.verify("s3cretpass", &hash).await.unwrap());
        assert!(!hasher.verify("wrongpass", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn should_treat_garbage_hash_as_mismatch() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(!hasher.verify("s3cretpass", "not-a-hash").await.unwrap());
    }
}
