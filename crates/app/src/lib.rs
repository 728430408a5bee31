//! # storefront-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HistoryStore`: atomic per-user browsing history
//!   - `SkuRepository` / `SearchIndex`: catalog reads and search
//!   - `UserRepository` / `VerificationCodeStore`: accounts and SMS codes
//!   - `AddressRepository`: address books
//!   - `PasswordHasher`, `TokenIssuer`, `ActivationMailer`: auth collaborators
//!   - `HomepageSource` / `PagePublisher`: static homepage generation
//! - Define **use-case services**:
//!   - `HistoryService`: record and list recently viewed SKUs
//!   - `CatalogService`: SKU lookup, category listings, search
//!   - `UserService`: register, login, profile, email verification
//!   - `AddressService`: address book management
//!   - `HomepageService`: assemble and publish the index page
//!
//! ## Dependency rule
//! Depends on `storefront-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
