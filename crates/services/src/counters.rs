//! Counter Store: the denormalized aggregate counters.
//!
//! Each function mutates exactly one counter field on exactly one entity,
//! inside the caller's unit of work. Callers issue one call per logical
//! effect (one product gained a deposit, one deposit lost a product) and
//! never batch. Decrements clamp at zero.

use stockroom_core::{BrandId, CategoryId, DepositId, DomainError, DomainResult, ProductId};
use stockroom_store::Tables;

pub fn increment_brand_products(tables: &mut Tables, id: BrandId) -> DomainResult<()> {
    let brand = tables
        .brand_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("brand {id} not found")))?;
    brand.increment_associated_product_count();
    Ok(())
}

pub fn decrement_brand_products(tables: &mut Tables, id: BrandId) -> DomainResult<()> {
    let brand = tables
        .brand_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("brand {id} not found")))?;
    brand.decrement_associated_product_count();
    Ok(())
}

pub fn increment_category_products(tables: &mut Tables, id: CategoryId) -> DomainResult<()> {
    let category = tables
        .category_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("category {id} not found")))?;
    category.increment_associated_product_count();
    Ok(())
}

pub fn decrement_category_products(tables: &mut Tables, id: CategoryId) -> DomainResult<()> {
    let category = tables
        .category_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("category {id} not found")))?;
    category.decrement_associated_product_count();
    Ok(())
}

pub fn increment_deposit_products(tables: &mut Tables, id: DepositId) -> DomainResult<()> {
    let deposit = tables
        .deposit_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("deposit {id} not found")))?;
    deposit.increment_product_count();
    Ok(())
}

pub fn decrement_deposit_products(tables: &mut Tables, id: DepositId) -> DomainResult<()> {
    let deposit = tables
        .deposit_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("deposit {id} not found")))?;
    deposit.decrement_product_count();
    Ok(())
}

pub fn increment_product_deposits(tables: &mut Tables, id: ProductId) -> DomainResult<()> {
    let product = tables
        .product_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("product {id} not found")))?;
    product.increment_deposits_count();
    Ok(())
}

pub fn decrement_product_deposits(tables: &mut Tables, id: ProductId) -> DomainResult<()> {
    let product = tables
        .product_mut(id)
        .ok_or_else(|| DomainError::not_found(format!("product {id} not found")))?;
    product.decrement_deposits_count();
    Ok(())
}
