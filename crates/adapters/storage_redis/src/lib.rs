//! # storefront-adapter-storage-redis
//!
//! Redis adapter using [redis-rs](https://docs.rs/redis) with a shared
//! [`ConnectionManager`](redis::aio::ConnectionManager).
//!
//! ## Responsibilities
//! - `HistoryStore`: per-user lists updated with one `MULTI`/`EXEC` batch
//! - `VerificationCodeStore`: SMS codes written by the messaging service
//! - `TokenIssuer`: opaque access and email-activation tokens with a TTL
//!
//! Every command is bounded by the configured timeout; an expired timeout is
//! reported like any other store failure.
//!
//! ## Dependency rule
//! Depends on `storefront-app` (for port traits) and `storefront-domain` (for domain types).

mod error;
mod keys;

pub mod codes;
pub mod config;
pub mod history;
pub mod tokens;

pub use codes::RedisSmsCodeStore;
pub use config::{Config, RedisConnection};
pub use error::RedisStoreError;
pub use history::RedisHistoryStore;
pub use tokens::RedisTokenIssuer;
