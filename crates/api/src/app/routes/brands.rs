use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::BrandId;
use stockroom_services::{SaveBrand, Services};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route("/:id", get(get_brand).put(update_brand).delete(delete_brand))
}

fn parse_id(id: &str) -> Result<BrandId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid brand id"))
}

fn to_save(id: Option<BrandId>, body: dto::SaveBrandRequest) -> SaveBrand {
    SaveBrand {
        id,
        name: body.name.unwrap_or_default(),
        description: body.description,
        country: body.country,
    }
}

pub async fn list_brands(
    Extension(services): Extension<Arc<Services>>,
) -> axum::response::Response {
    match services.brands.list() {
        Ok(brands) => {
            let items: Vec<_> = brands.iter().map(dto::brand_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_brand(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<dto::SaveBrandRequest>,
) -> axum::response::Response {
    match services.brands.save(to_save(None, body)) {
        Ok(brand) => (StatusCode::CREATED, Json(dto::brand_to_json(&brand))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_brand(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.brands.get(id) {
        Ok(brand) => (StatusCode::OK, Json(dto::brand_to_json(&brand))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_brand(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SaveBrandRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.brands.save(to_save(Some(id), body)) {
        Ok(brand) => (StatusCode::OK, Json(dto::brand_to_json(&brand))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_brand(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.brands.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
