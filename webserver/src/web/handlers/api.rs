//! REST API handlers
//!
//! Thin adapters from HTTP requests onto `CatalogService`.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use shared::{CatalogFilter, CatalogStatus, CountryRecord, DeleteOutcome, RefreshOutcome, SortOrder};

use crate::error::WebServerResult;
use crate::state::WebServerState;
use crate::traits::CatalogService;

/// Query string accepted by `GET /countries`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            region: non_blank(self.region.as_deref()),
            currency_code: non_blank(self.currency.as_deref()),
        }
    }

    fn sort(&self) -> SortOrder {
        SortOrder::from(self.sort.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// POST /countries/refresh
pub async fn refresh_countries<C: CatalogService>(
    State(state): State<WebServerState<C>>,
) -> WebServerResult<Json<RefreshOutcome>> {
    Ok(Json(state.catalog.refresh().await?))
}

/// GET /countries
pub async fn list_countries<C: CatalogService>(
    State(state): State<WebServerState<C>>,
    Query(params): Query<ListParams>,
) -> WebServerResult<Json<Vec<CountryRecord>>> {
    let records = state.catalog.find_all(params.filter(), params.sort()).await?;
    Ok(Json(records))
}

/// GET /countries/image
pub async fn summary_image<C: CatalogService>(State(state): State<WebServerState<C>>) -> WebServerResult<Response> {
    let bytes = state.catalog.summary_artifact().await?;
    Ok(([(header::CONTENT_TYPE, state.catalog.summary_content_type())], bytes).into_response())
}

/// GET /countries/:name
pub async fn get_country<C: CatalogService>(
    State(state): State<WebServerState<C>>,
    Path(name): Path<String>,
) -> WebServerResult<Json<CountryRecord>> {
    Ok(Json(state.catalog.find_one(&name).await?))
}

/// DELETE /countries/:name
pub async fn delete_country<C: CatalogService>(
    State(state): State<WebServerState<C>>,
    Path(name): Path<String>,
) -> WebServerResult<Json<DeleteOutcome>> {
    Ok(Json(state.catalog.delete(&name).await?))
}

/// GET /status
pub async fn get_status<C: CatalogService>(
    State(state): State<WebServerState<C>>,
) -> WebServerResult<Json<CatalogStatus>> {
    Ok(Json(state.catalog.status().await?))
}

/// GET /health
pub async fn health_check<C: CatalogService>(State(state): State<WebServerState<C>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.get_uptime_seconds(),
    }))
}
