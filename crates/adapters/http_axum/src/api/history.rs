//! JSON REST handlers for browsing history.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use storefront_domain::error::ValidationError;
use storefront_domain::id::SkuId;
use storefront_domain::sku::SkuView;

use super::IdInput;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for `POST /browse_histories`.
#[derive(Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub sku_id: Option<IdInput>,
}

#[derive(Serialize)]
pub struct RecordBody {
    pub sku_id: SkuId,
}

pub enum RecordResponse {
    Created(Json<RecordBody>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

pub enum ListResponse {
    Ok(Json<Vec<SkuView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /browse_histories`
pub async fn record<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
    Json(req): Json<RecordRequest>,
) -> Result<RecordResponse, ApiError> {
    let sku_id: SkuId = req
        .sku_id
        .ok_or(ValidationError::EmptyField { field: "sku_id" })?
        .parse()?;
    state.history.record(user, sku_id).await?;
    Ok(RecordResponse::Created(Json(RecordBody { sku_id })))
}

/// `GET /browse_histories`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    AuthUser(user): AuthUser,
) -> Result<ListResponse, ApiError> {
    let views = state.history.list_views(user).await?;
    Ok(ListResponse::Ok(Json(views)))
}
