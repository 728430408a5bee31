//! Redis implementation of [`TokenIssuer`].
//!
//! Tokens are random UUIDs; Redis maps them to the user they were issued for
//! and forgets them after their TTL.

use std::time::Duration;

use redis::AsyncCommands;
use uuid::Uuid;

use storefront_app::ports::TokenIssuer;
use storefront_domain::error::StorefrontError;
use storefront_domain::id::UserId;

use crate::config::RedisConnection;
use crate::error::RedisStoreError;
use crate::keys;

/// Opaque token issuer backed by Redis keys with expiry.
#[derive(Clone)]
pub struct RedisTokenIssuer {
    conn: RedisConnection,
    access_ttl: Duration,
    email_ttl: Duration,
}

impl RedisTokenIssuer {
    #[must_use]
    pub fn new(conn: RedisConnection, access_ttl: Duration, email_ttl: Duration) -> Self {
        Self {
            conn,
            access_ttl,
            email_ttl,
        }
    }

    async fn put(&self, key: String, value: String, ttl: Duration) -> Result<(), RedisStoreError> {
        let mut conn = self.conn.manager();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("EX").arg(ttl.as_secs().max(1));
        self.conn.bounded::<()>(cmd.query_async(&mut conn)).await
    }

    async fn fetch(&self, key: &str) -> Result<Option<String>, RedisStoreError> {
        let mut conn = self.conn.manager();
        self.conn.bounded(conn.get(key)).await
    }
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Split a stored `"{user_id}:{email}"` value.
fn parse_email_claim(raw: &str) -> Option<(UserId, String)> {
    let (id, email) = raw.split_once(':')?;
    let id = id.parse().ok()?;
    Some((id, email.to_owned()))
}

impl TokenIssuer for RedisTokenIssuer {
    async fn issue_access(&self, user: UserId) -> Result<String, StorefrontError> {
        let token = new_token();
        self.put(keys::access_token(&token), user.to_string(), self.access_ttl)
            .await?;
        Ok(token)
    }

    async fn verify_access(&self, token: &str) -> Result<Option<UserId>, StorefrontError> {
        let key = keys::access_token(token);
        match self.fetch(&key).await? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| RedisStoreError::Corrupt { key }.into()),
        }
    }

    async fn issue_email_verification(
        &self,
        user: UserId,
        email: &str,
    ) -> Result<String, StorefrontError> {
        let token = new_token();
        self.put(
            keys::email_token(&token),
            format!("{user}:{email}"),
            self.email_ttl,
        )
        .await?;
        Ok(token)
    }

    async fn verify_email(&self, token: &str) -> Result<Option<(UserId, String)>, StorefrontError> {
        let key = keys::email_token(token);
        match self.fetch(&key).await? {
            None => Ok(None),
            Some(raw) => parse_email_claim(&raw)
                .map(Some)
                .ok_or_else(|| RedisStoreError::Corrupt { key }.into()),
        }
    }
}
