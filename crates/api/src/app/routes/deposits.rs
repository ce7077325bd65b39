use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::DepositId;
use stockroom_services::{SaveDeposit, Services};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_deposits).post(create_deposit))
        .route(
            "/:id",
            get(get_deposit).put(update_deposit).delete(delete_deposit),
        )
}

fn parse_id(id: &str) -> Result<DepositId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid deposit id")
    })
}

fn to_save(id: Option<DepositId>, body: dto::SaveDepositRequest) -> SaveDeposit {
    SaveDeposit {
        id,
        name: body.name.unwrap_or_default(),
        location: body.location,
        description: body.description,
    }
}

pub async fn list_deposits(
    Extension(services): Extension<Arc<Services>>,
) -> axum::response::Response {
    match services.deposits.list() {
        Ok(deposits) => {
            let items: Vec<_> = deposits.iter().map(dto::deposit_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_deposit(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<dto::SaveDepositRequest>,
) -> axum::response::Response {
    match services.deposits.save(to_save(None, body)) {
        Ok(deposit) => (StatusCode::CREATED, Json(dto::deposit_to_json(&deposit))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_deposit(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.deposits.get(id) {
        Ok(deposit) => (StatusCode::OK, Json(dto::deposit_to_json(&deposit))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_deposit(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SaveDepositRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.deposits.save(to_save(Some(id), body)) {
        Ok(deposit) => (StatusCode::OK, Json(dto::deposit_to_json(&deposit))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_deposit(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.deposits.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
