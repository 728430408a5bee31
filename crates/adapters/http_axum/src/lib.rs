//! # storefront-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** for accounts, addresses, browsing history and the
//!   catalog (`/users`, `/addresses`, `/browse_histories`, `/skus/search`, …)
//! - Authenticate requests from the `Authorization: JWT <token>` header
//! - Render the **static homepage** with askama and serve generated pages
//!   under `/static`
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `storefront-app` (for port traits and services) and
//! `storefront-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod pages;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
