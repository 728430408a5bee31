//! Connection setup.

use std::future::Future;
use std::time::Duration;

use redis::RedisResult;
use redis::aio::ConnectionManager;

use crate::error::RedisStoreError;

/// Configuration for the Redis adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server URL, e.g. `redis://127.0.0.1:6379/0`.
    pub url: String,
    /// Upper bound for connecting and for every command.
    pub command_timeout: Duration,
}

impl Config {
    /// Default bound applied to each command.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            command_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Open a managed connection, reconnecting transparently afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RedisStoreError`] for an invalid URL, an unreachable server,
    /// or when connecting takes longer than the timeout.
    pub async fn connect(self) -> Result<RedisConnection, RedisStoreError> {
        let client = redis::Client::open(self.url.as_str())?;
        let manager = within(self.command_timeout, client.get_connection_manager()).await?;
        tracing::debug!(url = %self.url, "redis connected");
        Ok(RedisConnection {
            manager,
            timeout: self.command_timeout,
        })
    }
}

/// Await `fut`, failing with [`RedisStoreError::Timeout`] after `limit`.
async fn within<T>(
    limit: Duration,
    fut: impl Future<Output = RedisResult<T>>,
) -> Result<T, RedisStoreError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(RedisStoreError::from),
        Err(_) => Err(RedisStoreError::Timeout(limit)),
    }
}

/// Shared handle to Redis, cheap to clone into each adapter.
#[derive(Clone)]
pub struct RedisConnection {
    manager: ConnectionManager,
    timeout: Duration,
}

impl RedisConnection {
    /// A connection for one command or batch.
    pub(crate) fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Await a command future under the configured timeout.
    pub(crate) async fn bounded<T>(
        &self,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> Result<T, RedisStoreError> {
        within(self.timeout, fut).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_time_out_slow_commands() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, redis::RedisError>(())
        };
        let result = within(Duration::from_millis(10), slow).await;
        assert!(matches!(result, Err(RedisStoreError::Timeout(_))));
    }

    #[tokio::test]
    async fn should_pass_through_fast_commands() {
        let result = within(Duration::from_secs(1), async { Ok::<_, redis::RedisError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn should_reject_malformed_url() {
        let result = Config::new("not a url").connect().await;
        assert!(matches!(result, Err(RedisStoreError::Command(_))));
    }
}
