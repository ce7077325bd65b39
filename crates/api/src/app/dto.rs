use serde::Deserialize;
use serde_json::json;

use stockroom_core::{DepositId, Money};
use stockroom_domain::{AuditLog, Brand, Category, Deposit, Product, Stock, StockMovement, User};

// -------------------------
// Request DTOs
//
// Required fields arrive as `Option` on purpose: their absence is reported by
// the services as a validation error, not by the JSON decoder.
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SaveBrandRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveCategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDepositRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub deposit_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SaveStockRequest {
    pub product_id: Option<i64>,
    pub deposit_id: Option<i64>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyMovementRequest {
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    pub product_id: Option<i64>,
    pub origin_deposit_id: Option<i64>,
    pub destination_deposit_id: Option<i64>,
    #[serde(default)]
    pub quantity: i64,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SaveUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovementQuery {
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    pub origin: Option<i64>,
    pub destination: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub entity: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn brand_to_json(b: &Brand) -> serde_json::Value {
    json!({
        "id": b.id.as_i64(),
        "name": b.name,
        "description": b.description,
        "country": b.country,
        "created_at": b.created_at.to_rfc3339(),
        "associated_product_count": b.associated_product_count,
    })
}

pub fn category_to_json(c: &Category) -> serde_json::Value {
    json!({
        "id": c.id.as_i64(),
        "name": c.name,
        "associated_product_count": c.associated_product_count,
    })
}

pub fn deposit_to_json(d: &Deposit) -> serde_json::Value {
    json!({
        "id": d.id.as_i64(),
        "name": d.name,
        "location": d.location,
        "description": d.description,
        "product_count": d.product_count,
        "associated_at": d.associated_at.to_rfc3339(),
    })
}

pub fn money_to_json(m: &Money) -> serde_json::Value {
    json!({
        "currency": m.currency,
        "amount": m.amount,
    })
}

/// `deposits` is the ledger-derived deposit set for the product.
pub fn product_to_json(p: &Product, deposits: &[DepositId]) -> serde_json::Value {
    json!({
        "id": p.id.as_i64(),
        "name": p.name,
        "description": p.description,
        "purchase_price": money_to_json(&p.purchase_price),
        "sale_price": money_to_json(&p.sale_price),
        "brand_id": p.brand_id.as_i64(),
        "category_id": p.category_id.as_i64(),
        "deposits_count": p.deposits_count,
        "deposits": deposits.iter().map(|d| d.as_i64()).collect::<Vec<_>>(),
    })
}

pub fn stock_to_json(s: &Stock) -> serde_json::Value {
    json!({
        "id": s.id.as_i64(),
        "product_id": s.product_id.as_i64(),
        "deposit_id": s.deposit_id.as_i64(),
        "quantity": s.quantity,
    })
}

pub fn movement_to_json(m: &StockMovement) -> serde_json::Value {
    json!({
        "id": m.id.as_i64(),
        "type": m.movement_type().as_str(),
        "product_id": m.product_id.as_i64(),
        "origin_deposit_id": m.origin().map(|d| d.as_i64()),
        "destination_deposit_id": m.destination().map(|d| d.as_i64()),
        "quantity": m.quantity,
        "moved_at": m.moved_at.to_rfc3339(),
        "user_id": m.user_id.map(|u| u.as_i64()),
    })
}

/// The password never appears in responses.
pub fn user_to_json(u: &User) -> serde_json::Value {
    json!({
        "id": u.id.as_i64(),
        "first_name": u.first_name,
        "last_name": u.last_name,
        "email": u.email,
    })
}

pub fn audit_log_to_json(a: &AuditLog) -> serde_json::Value {
    json!({
        "id": a.id.as_i64(),
        "entity_name": a.entity_name,
        "entity_id": a.entity_id,
        "operation": a.operation.as_str(),
        "username": a.username,
        "recorded_at": a.recorded_at.to_rfc3339(),
    })
}
