//! # storefront-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the catalog, user, address, homepage and history port traits
//!   defined in `storefront-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `storefront-app` (for port traits) and `storefront-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
mod error;

pub mod address_repo;
pub mod history_store;
pub mod homepage_source;
pub mod pool;
pub mod sku_repo;
pub mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
