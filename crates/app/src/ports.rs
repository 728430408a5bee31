//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod addresses;
pub mod auth;
pub mod catalog;
pub mod history;
pub mod homepage;
pub mod users;

pub use addresses::AddressRepository;
pub use auth::{ActivationMailer, PasswordHasher, TokenIssuer};
pub use catalog::{SearchIndex, SkuRepository};
pub use history::HistoryStore;
pub use homepage::{HomepageSource, PagePublisher};
pub use users::{UserRepository, VerificationCodeStore};
