use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use medstock_core::MedicineId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/summary", get(summary))
        .route("/expiring-soon", get(expiring_soon))
        .route("/expired", get(expired))
        .route("/low-stock", get(low_stock))
        .route("/:id", put(update).delete(delete_medicine))
}

fn parse_id(id: &str) -> Result<MedicineId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid medicine id")
    })
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.medicines.list().await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::MedicineDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::MedicineBody>,
) -> axum::response::Response {
    match services.medicines.create(body.into_draft()).await {
        Ok(m) => (StatusCode::CREATED, Json(dto::MedicineDto::from(m))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::MedicineBody>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.medicines.update(id, body.into_draft()).await {
        Ok(m) => Json(dto::MedicineDto::from(m)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_medicine(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.medicines.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SummaryQuery>,
) -> axum::response::Response {
    match services.medicines.summary(query.days, query.threshold).await {
        Ok(s) => Json(dto::InventorySummaryDto::from(s)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn expiring_soon(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DaysQuery>,
) -> axum::response::Response {
    match services.medicines.expiring_soon(query.days).await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::MedicineDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn expired(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.medicines.expired().await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::MedicineDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ThresholdQuery>,
) -> axum::response::Response {
    match services.medicines.low_stock(query.threshold).await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::MedicineDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
