use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::{DepositId, MovementId, ProductId, UserId};
use stockroom_domain::MovementType;
use stockroom_services::{MovementRequest, Services};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_movements).post(apply_movement))
        .route("/:id", get(get_movement).delete(delete_movement))
}

fn parse_id(id: &str) -> Result<MovementId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid movement id")
    })
}

pub async fn apply_movement(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<dto::ApplyMovementRequest>,
) -> axum::response::Response {
    // An unknown type string is a validation failure; an *absent* type stays
    // absent so the processor reports it itself.
    let movement_type = match body.movement_type.as_deref() {
        Some(raw) => match raw.parse::<MovementType>() {
            Ok(t) => Some(t),
            Err(e) => return errors::domain_error_to_response(e),
        },
        None => None,
    };

    let req = MovementRequest {
        movement_type,
        product_id: body.product_id.map(ProductId::new),
        origin_deposit_id: body.origin_deposit_id.map(DepositId::new),
        destination_deposit_id: body.destination_deposit_id.map(DepositId::new),
        quantity: body.quantity,
        user_id: body.user_id.map(UserId::new),
    };

    match services.movements.apply(req) {
        Ok(movement) => {
            (StatusCode::CREATED, Json(dto::movement_to_json(&movement))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_movements(
    Extension(services): Extension<Arc<Services>>,
    Query(query): Query<dto::MovementQuery>,
) -> axum::response::Response {
    let origin = query.origin.map(DepositId::new);
    let destination = query.destination.map(DepositId::new);

    let result = match (origin, destination, query.movement_type.as_deref()) {
        (Some(origin), Some(destination), _) => {
            services.movements.transfers_between(origin, destination)
        }
        (Some(origin), None, _) => services.movements.by_origin_deposit(origin),
        (None, Some(destination), _) => services.movements.by_destination_deposit(destination),
        (None, None, Some(raw)) => match raw.parse::<MovementType>() {
            Ok(t) => services.movements.by_type(t),
            Err(e) => return errors::domain_error_to_response(e),
        },
        (None, None, None) => services.movements.list(),
    };

    match result {
        Ok(movements) => {
            let items: Vec<_> = movements.iter().map(dto::movement_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_movement(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.movements.get(id) {
        Ok(movement) => (StatusCode::OK, Json(dto::movement_to_json(&movement))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_movement(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.movements.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
