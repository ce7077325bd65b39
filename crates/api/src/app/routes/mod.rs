use axum::Router;

pub mod audit_logs;
pub mod brands;
pub mod categories;
pub mod deposits;
pub mod movements;
pub mod products;
pub mod stock;
pub mod system;
pub mod users;

/// Router for all entity endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/brands", brands::router())
        .nest("/categories", categories::router())
        .nest("/deposits", deposits::router())
        .nest("/products", products::router())
        .nest("/stock", stock::router())
        .nest("/movements", movements::router())
        .nest("/users", users::router())
        .nest("/audit-logs", audit_logs::router())
}
