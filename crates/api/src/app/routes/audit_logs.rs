use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_services::Services;

use crate::app::dto;

pub fn router() -> Router {
    Router::new().route("/", get(list_audit_logs))
}

pub async fn list_audit_logs(
    Extension(services): Extension<Arc<Services>>,
    Query(query): Query<dto::AuditLogQuery>,
) -> axum::response::Response {
    let logs = match query.entity.as_deref() {
        Some(entity) => services.audit_logs.for_entity(entity),
        None => services.audit_logs.list(),
    };

    let items: Vec<_> = logs.iter().map(dto::audit_log_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
