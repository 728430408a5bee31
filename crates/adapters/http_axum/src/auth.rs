//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use storefront_domain::error::StorefrontError;
use storefront_domain::id::UserId;

use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// The authenticated caller, resolved from `Authorization: JWT <token>`
/// (`Bearer` is accepted too).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    let known = scheme.eq_ignore_ascii_case("JWT") || scheme.eq_ignore_ascii_case("Bearer");
    (known && !token.is_empty()).then_some(token)
}

impl<B: Backend> FromRequestParts<AppState<B>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<B>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(StorefrontError::Unauthorized)?;
        let user = state.users.authenticate(token).await?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn should_accept_jwt_and_bearer_schemes() {
        assert_eq!(bearer_token(&headers("JWT abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("jwt  abc ")), Some("abc"));
    }

    #[test]
    fn should_reject_missing_or_unknown_scheme() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("JWT")), None);
        assert_eq!(bearer_token(&headers("JWT ")), None);
    }
}
