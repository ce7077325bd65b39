use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::{DepositId, ProductId, StockId};
use stockroom_services::{SaveStock, Services};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stock).post(create_stock))
        .route("/:id", get(get_stock).put(update_stock).delete(delete_stock))
}

fn parse_id(id: &str) -> Result<StockId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid stock id"))
}

fn to_save(
    id: Option<StockId>,
    body: dto::SaveStockRequest,
) -> Result<SaveStock, axum::response::Response> {
    let quantity = match body.quantity {
        Some(q) => q,
        None => {
            return Err(errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "stock quantity must be specified",
            ));
        }
    };
    Ok(SaveStock {
        id,
        product_id: body.product_id.map(ProductId::new),
        deposit_id: body.deposit_id.map(DepositId::new),
        quantity,
    })
}

pub async fn list_stock(Extension(services): Extension<Arc<Services>>) -> axum::response::Response {
    match services.stock.list() {
        Ok(rows) => {
            let items: Vec<_> = rows.iter().map(dto::stock_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_stock(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<dto::SaveStockRequest>,
) -> axum::response::Response {
    let req = match to_save(None, body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.stock.save(req) {
        Ok(row) => (StatusCode::CREATED, Json(dto::stock_to_json(&row))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_stock(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.stock.get(id) {
        Ok(row) => (StatusCode::OK, Json(dto::stock_to_json(&row))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_stock(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SaveStockRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let req = match to_save(Some(id), body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.stock.save(req) {
        Ok(row) => (StatusCode::OK, Json(dto::stock_to_json(&row))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_stock(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.stock.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
