//! JSON REST handlers for accounts and authentication.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use storefront_app::services::user_service::SignedIn;
use storefront_domain::id::UserId;
use storefront_domain::user::{Registration, User};

use super::Message;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// `{username|mobile, count}` answer of the availability checks.
#[derive(Serialize)]
pub struct CountBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub count: u64,
}

/// A signed-in user with the token to send on later requests.
#[derive(Serialize)]
pub struct TokenBody {
    pub user_id: UserId,
    pub username: String,
    pub token: String,
}

impl From<SignedIn> for TokenBody {
    fn from(value: SignedIn) -> Self {
        Self {
            user_id: value.user.id,
            username: value.user.username,
            token: value.token,
        }
    }
}

/// Request body for `POST /authorizations`.
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or mobile number.
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /email`.
#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Query of `PUT /emails/verification`.
#[derive(Deserialize)]
pub struct VerificationQuery {
    pub token: Option<String>,
}

pub enum CountResponse {
    Ok(Json<CountBody>),
}

impl IntoResponse for CountResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum RegisterResponse {
    Created(Json<TokenBody>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

pub enum LoginResponse {
    Ok(Json<TokenBody>),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum UserResponse {
    Ok(Json<User>),
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum VerifyResponse {
    Ok(Json<Message>),
    MissingToken,
}

impl IntoResponse for VerifyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::MissingToken => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "missing token" })),
            )
                .into_response(),
        }
    }
}

/// `GET /usernames/{username}/count`
pub async fn username_count<B: Backend>(
    State(state): State<AppState<B>>,
    Path(username): Path<String>,
) -> Result<CountResponse, ApiError> {
    let count = state.users.username_count(&username).await?;
    Ok(CountResponse::Ok(Json(CountBody {
        username: Some(username),
        mobile: None,
        count,
    })))
}

/// `GET /mobiles/{mobile}/count`
pub async fn mobile_count<B: Backend>(
    State(state): State<AppState<B>>,
    Path(mobile): Path<String>,
) -> Result<CountResponse, ApiError> {
    let count = state.users.mobile_count(&mobile).await?;
    Ok(CountResponse::Ok(Json(CountBody {
        username: None,
        mobile: Some(mobile),
        count,
    })))
}

/// `POST /users`
pub async fn register<B: Backend>(
    State(state): State<AppState<B>>,
    Json(form): Json<Registration>,
) -> Result<RegisterResponse, ApiError> {
    let signed_in = state.users.register(form).await?;
    Ok(RegisterResponse::Created(Json(signed_in.into())))
}

/// `POST /authorizations`
pub async fn login<B: Backend>(
    State(state): State<AppState<B>>,
    Json(req): Json<LoginRequest>,
) -> Result<LoginResponse, ApiError> {
    let signed_in = state.users.login(&req.username, &req.password).await?;
    Ok(LoginResponse::Ok(Json(signed_in.into())))
}

/// `GET /user`
pub async fn profile<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
) -> Result<UserResponse, ApiError> {
    let user = state.users.profile(user).await?;
    Ok(UserResponse::Ok(Json(user)))
}

/// `PUT /email`
pub async fn bind_email<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Json(req): Json<EmailRequest>,
) -> Result<UserResponse, ApiError> {
    let user = state.users.bind_email(user, req.email.trim()).await?;
    Ok(UserResponse::Ok(Json(user)))
}

/// `PUT /emails/verification?token=`
pub async fn verify_email<B: Backend>(
    State(state): State<AppState<B>>,
    Query(query): Query<VerificationQuery>,
) -> Result<VerifyResponse, ApiError> {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return Ok(VerifyResponse::MissingToken);
    };
    state.users.verify_email(&token).await?;
    Ok(VerifyResponse::Ok(Json(Message::OK)))
}
