//! JSON REST handlers for the catalog.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use storefront_domain::catalog::{Page, Paginated, SkuOrdering};
use storefront_domain::id::{CategoryId, SkuId};
use storefront_domain::sku::{Sku, SkuView};

use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Query of `GET /categories/{id}/skus`.
#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub ordering: Option<String>,
}

/// Query of `GET /skus/search`.
#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub enum PageResponse {
    Ok(Json<Paginated<SkuView>>),
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum GetResponse {
    Ok(Json<Sku>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /categories/{id}/skus`
pub async fn list_category<B: Backend>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<PageResponse, ApiError> {
    let category: CategoryId = id.parse()?;
    let ordering = match query.ordering.as_deref() {
        None | Some("") => SkuOrdering::default(),
        Some(raw) => raw.parse()?,
    };
    let page = Page::new(query.page, query.page_size)?;
    let found = state.catalog.list_category(category, ordering, page).await?;
    Ok(PageResponse::Ok(Json(found)))
}

/// `GET /skus/search`
pub async fn search<B: Backend>(
    State(state): State<AppState<B>>,
    Query(query): Query<SearchQuery>,
) -> Result<PageResponse, ApiError> {
    let page = Page::new(query.page, query.page_size)?;
    let found = state.catalog.search(&query.text, page).await?;
    Ok(PageResponse::Ok(Json(found)))
}

/// `GET /skus/{id}`
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let id: SkuId = id.parse()?;
    let sku = state.catalog.get_sku(id).await?;
    Ok(GetResponse::Ok(Json(sku)))
}
