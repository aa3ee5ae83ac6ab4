use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use medstock_core::BatchId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(receive))
        .route("/summary", get(summary))
        .route("/expiring", get(expiring))
        .route("/:id", get(get_batch).put(update).delete(delete_batch))
}

fn parse_id(id: &str) -> Result<BatchId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid stock id"))
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.stock.list().await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::BatchDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn receive(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BatchBody>,
) -> axum::response::Response {
    match services.stock.receive(body.into_draft()).await {
        Ok(b) => (StatusCode::CREATED, Json(dto::BatchDto::from(b))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stock.get(id).await {
        Ok(b) => Json(dto::BatchDto::from(b)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BatchBody>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stock.update(id, body.into_draft()).await {
        Ok(b) => Json(dto::BatchDto::from(b)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stock.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stock.summary().await {
        Ok(s) => Json(dto::StockSummaryDto::from(s)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn expiring(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DaysQuery>,
) -> axum::response::Response {
    match services.stock.expiring_within(query.days).await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::BatchDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
