use axum::Router;

pub mod auth;
pub mod distributions;
pub mod medicines;
pub mod stock;
pub mod system;

/// Router for all protected (token-gated) routes.
pub fn router() -> Router {
    Router::new()
        .nest("/api/medicines", medicines::router())
        .nest("/api/stock", stock::router())
        .nest("/api/distributions", distributions::router())
}
