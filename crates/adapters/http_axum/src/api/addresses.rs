//! JSON REST handlers for the address book.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use storefront_domain::address::{Address, AddressBook, AddressDraft};
use storefront_domain::id::AddressId;

use super::Message;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request and response body of `PUT /addresses/{id}/title`.
#[derive(Serialize, Deserialize)]
pub struct TitleBody {
    pub title: String,
}

pub enum ListResponse {
    Ok(Json<AddressBook>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum SaveResponse {
    Created(Json<Address>),
    Ok(Json<Address>),
}

impl IntoResponse for SaveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

pub enum StatusResponse {
    Ok(Json<Message>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum TitleResponse {
    Ok(Json<TitleBody>),
}

impl IntoResponse for TitleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /addresses`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
) -> Result<ListResponse, ApiError> {
    let book = state.addresses.list(user).await?;
    Ok(ListResponse::Ok(Json(book)))
}

/// `POST /addresses`
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Json(draft): Json<AddressDraft>,
) -> Result<SaveResponse, ApiError> {
    let address = state.addresses.create(user, draft).await?;
    Ok(SaveResponse::Created(Json(address)))
}

/// `PUT /addresses/{id}`
pub async fn update<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(draft): Json<AddressDraft>,
) -> Result<SaveResponse, ApiError> {
    let id: AddressId = id.parse()?;
    let address = state.addresses.update(user, id, draft).await?;
    Ok(SaveResponse::Ok(Json(address)))
}

/// `DELETE /addresses/{id}`
pub async fn delete<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id: AddressId = id.parse()?;
    state.addresses.delete(user, id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `PUT /addresses/{id}/status`
pub async fn set_default<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusResponse, ApiError> {
    let id: AddressId = id.parse()?;
    state.addresses.set_default(user, id).await?;
    Ok(StatusResponse::Ok(Json(Message::OK)))
}

/// `PUT /addresses/{id}/title`
pub async fn update_title<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<TitleBody>,
) -> Result<TitleResponse, ApiError> {
    let id: AddressId = id.parse()?;
    state.addresses.update_title(user, id, &body.title).await?;
    Ok(TitleResponse::Ok(Json(TitleBody {
        title: body.title.trim().to_owned(),
    })))
}
