//! # storefront-domain
//!
//! Pure domain model for the storefront backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **SKUs** and their public projection
//! - Define catalog **ordering** and **pagination** parameters
//! - Define **users** and the registration rules
//! - Define **addresses** and their validation
//! - Define **browsing history**: the recency-ordered, deduplicated,
//!   size-capped list of recently viewed SKUs
//! - Assemble the **homepage** from channels, categories, and contents
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod address;
pub mod catalog;
pub mod history;
pub mod homepage;
pub mod sku;
pub mod user;
