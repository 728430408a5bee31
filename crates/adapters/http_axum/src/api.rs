//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod addresses;
#[allow(clippy::missing_errors_doc)]
pub mod catalog;
#[allow(clippy::missing_errors_doc)]
pub mod history;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, post, put};
use serde::{Deserialize, Serialize};

use storefront_domain::error::ValidationError;

use crate::state::{AppState, Backend};

/// Body of endpoints that only acknowledge success.
#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub const OK: Self = Self { message: "OK" };
}

/// An identifier submitted either as a JSON number or as a string.
///
/// Any other JSON value is kept so it can be rejected as an invalid id
/// rather than failing body extraction.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl IdInput {
    /// Convert into a typed id, rejecting non-positive and non-numeric input.
    pub fn parse<T>(self) -> Result<T, ValidationError>
    where
        T: TryFrom<i64, Error = ValidationError> + std::str::FromStr<Err = ValidationError>,
    {
        match self {
            Self::Number(raw) => T::try_from(raw),
            Self::Text(raw) => raw.parse(),
            Self::Other(raw) => Err(ValidationError::InvalidId(raw.to_string())),
        }
    }
}

/// Build the API router.
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        // Accounts
        .route("/usernames/{username}/count", get(users::username_count::<B>))
        .route("/mobiles/{mobile}/count", get(users::mobile_count::<B>))
        .route("/users", post(users::register::<B>))
        .route("/authorizations", post(users::login::<B>))
        .route("/user", get(users::profile::<B>))
        .route("/email", put(users::bind_email::<B>))
        .route("/emails/verification", put(users::verify_email::<B>))
        // Addresses
        .route(
            "/addresses",
            get(addresses::list::<B>).post(addresses::create::<B>),
        )
        .route(
            "/addresses/{id}",
            put(addresses::update::<B>).delete(addresses::delete::<B>),
        )
        .route("/addresses/{id}/status", put(addresses::set_default::<B>))
        .route("/addresses/{id}/title", put(addresses::update_title::<B>))
        // Browsing history
        .route(
            "/browse_histories",
            get(history::list::<B>).post(history::record::<B>),
        )
        // Catalog
        .route("/categories/{id}/skus", get(catalog::list_category::<B>))
        .route("/skus/search", get(catalog::search::<B>))
        .route("/skus/{id}", get(catalog::get::<B>))
}
