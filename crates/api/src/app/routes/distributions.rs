use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(history).post(distribute))
        .route("/officers", get(officers))
}

pub async fn distribute(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::DistributeBody>,
) -> axum::response::Response {
    match services
        .distributions
        .distribute(body.officer_id, body.medicine_id, body.quantity)
        .await
    {
        Ok(d) => {
            tracing::info!(
                distribution_id = %d.id,
                requested_by = ctx.subject(),
                "distribution recorded"
            );
            (StatusCode::CREATED, Json(dto::DistributionDto::from(d))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn history(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.distributions.history().await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::DistributionDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn officers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.distributions.officers().await {
        Ok(items) => Json(
            items
                .into_iter()
                .map(dto::OfficerDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
