use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::{BrandId, CategoryId, DepositId, ProductId};
use stockroom_domain::Product;
use stockroom_services::{SaveProduct, Services};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

fn to_save(id: Option<ProductId>, body: dto::SaveProductRequest) -> SaveProduct {
    SaveProduct {
        id,
        name: body.name.unwrap_or_default(),
        description: body.description,
        purchase_price: body.purchase_price,
        sale_price: body.sale_price,
        brand_id: body.brand_id.map(BrandId::new),
        category_id: body.category_id.map(CategoryId::new),
        deposit_ids: body.deposit_ids.into_iter().map(DepositId::new).collect(),
    }
}

fn product_response(services: &Services, product: &Product) -> serde_json::Value {
    let deposits = services
        .products
        .deposits_of(product.id)
        .unwrap_or_default();
    dto::product_to_json(product, &deposits)
}

pub async fn list_products(
    Extension(services): Extension<Arc<Services>>,
) -> axum::response::Response {
    match services.products.list() {
        Ok(products) => {
            let items: Vec<_> = products
                .iter()
                .map(|p| product_response(&services, p))
                .collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<dto::SaveProductRequest>,
) -> axum::response::Response {
    match services.products.save(to_save(None, body)) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(product_response(&services, &product)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.get(id) {
        Ok(product) => {
            (StatusCode::OK, Json(product_response(&services, &product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SaveProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.save(to_save(Some(id), body)) {
        Ok(product) => {
            (StatusCode::OK, Json(product_response(&services, &product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
