//! Product listing and purchase endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use bus::Context;
use catalog::{Command, ProductView, PurchaseProduct};
use common::AggregateId;
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, purchase_failure_message};

/// Header carrying a caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const INVALID_ID: &str = "invalid product UUID";

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PurchaseResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }
}

/// Builds the dispatch context, reusing the caller's request id when it is a UUID.
fn context(headers: &HeaderMap) -> Context {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .map(Context::with_request_id)
        .unwrap_or_default()
}

/// GET /products — list every product.
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let views = state.catalog.products(&context(&headers)).await?;
    Ok(Json(views))
}

/// GET /products/{id} — load a single product.
#[tracing::instrument(skip(state, headers))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProductView>, ApiError> {
    let id: AggregateId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(INVALID_ID.to_string()))?;

    let view = state.catalog.product(&context(&headers), id).await?;
    Ok(Json(view))
}

/// POST /products/{id}/purchase — purchase a product.
///
/// Always answers 200; failures are reported in the body.
#[tracing::instrument(skip(state, headers))]
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Json<PurchaseResponse> {
    let Ok(id) = id.parse::<AggregateId>() else {
        return Json(PurchaseResponse::failed(INVALID_ID));
    };

    let command = Command::PurchaseProduct(PurchaseProduct { id });
    match state.catalog.execute(&context(&headers), command).await {
        Ok(_) => Json(PurchaseResponse::ok()),
        Err(err) => Json(PurchaseResponse::failed(purchase_failure_message(&err))),
    }
}
