//! Redis implementation of [`VerificationCodeStore`].
//!
//! Codes live under `sms_{mobile}` with a TTL set by whoever sends them.

use std::time::Duration;

use redis::AsyncCommands;

use storefront_app::ports::VerificationCodeStore;
use storefront_domain::error::StorefrontError;

use crate::config::RedisConnection;
use crate::error::RedisStoreError;
use crate::keys;

/// Redis-backed SMS verification code lookup.
#[derive(Clone)]
pub struct RedisSmsCodeStore {
    conn: RedisConnection,
}

impl RedisSmsCodeStore {
    #[must_use]
    pub fn new(conn: RedisConnection) -> Self {
        Self { conn }
    }

    /// Store `code` for `mobile`, expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`RedisStoreError`] when the write fails or times out.
    pub async fn save(&self, mobile: &str, code: &str, ttl: Duration) -> Result<(), RedisStoreError> {
        let mut conn = self.conn.manager();
        let mut cmd = redis::cmd("SET");
        cmd.arg(keys::sms_code(mobile))
            .arg(code)
            .arg("EX")
            .arg(ttl.as_secs().max(1));
        self.conn.bounded::<()>(cmd.query_async(&mut conn)).await
    }
}

impl VerificationCodeStore for RedisSmsCodeStore {
    async fn sms_code(&self, mobile: &str) -> Result<Option<String>, StorefrontError> {
        let mut conn = self.conn.manager();
        let code: Option<String> = self.conn.bounded(conn.get(keys::sms_code(mobile))).await?;
        Ok(code)
    }
}
