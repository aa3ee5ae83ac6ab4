//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection (in-memory vs Postgres) and service wiring
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Extension, Router,
};

use medstock_auth::Hs256TokenService;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let tokens = Arc::new(
        Hs256TokenService::new(config.jwt_secret.as_bytes())
            .context("JWT_SECRET is unusable")?,
    );

    let app_services = Arc::new(
        services::build_services(config, tokens.clone())
            .await
            .context("failed to build services")?,
    );

    if let Some(admin) = &config.bootstrap_admin {
        app_services
            .auth
            .bootstrap_admin(&admin.username, &admin.password)
            .await
            .context("failed to seed bootstrap admin")?;
    }

    Ok(router_with(app_services, tokens))
}

/// Assemble the router from pre-built services (tests wire their own).
pub fn router_with(services: Arc<AppServices>, tokens: Arc<Hs256TokenService>) -> Router {
    let auth_state = middleware::AuthState { verifier: tokens };

    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(Extension(services.clone()));

    // Protected routes: everything else requires a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new().merge(public).merge(protected)
}
