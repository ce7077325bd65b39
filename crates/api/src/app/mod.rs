//! HTTP application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `routes/`: HTTP routes + handlers (one file per entity)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockroom_services::Services;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router over a fresh in-memory store (public
/// entrypoint used by `main.rs` and the black-box tests).
pub fn build_app() -> Router {
    build_app_with(Services::in_memory())
}

/// Build the router over pre-wired services.
pub fn build_app_with(services: Services) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
