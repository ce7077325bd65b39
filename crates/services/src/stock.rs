//! Stock Ledger: the authoritative set of (product, deposit) → quantity rows.
//!
//! The ledger itself is a pure data store; the counter effects that keep
//! `Product.deposits_count` and `Deposit.product_count` in sync with it live
//! in [`insert_row`] and [`remove_row`], which every caller that creates or
//! removes a row goes through (this service, the movement processor, product
//! creation).

use std::sync::Arc;

use stockroom_core::{DepositId, DomainError, DomainResult, ProductId, StockId};
use stockroom_domain::{AuditOperation, Stock};
use stockroom_store::{AuditSink, InMemoryStore, Tables};

use crate::counters;

/// Create-or-update request; create when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveStock {
    pub id: Option<StockId>,
    pub product_id: Option<ProductId>,
    pub deposit_id: Option<DepositId>,
    pub quantity: i64,
}

pub struct StockService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl StockService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<Stock>> {
        Ok(self.store.read()?.stock.iter().cloned().collect())
    }

    pub fn get(&self, id: StockId) -> DomainResult<Stock> {
        self.store
            .read()?
            .stock_row(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("stock {id} not found")))
    }

    pub fn exists(&self, product_id: ProductId, deposit_id: DepositId) -> DomainResult<bool> {
        Ok(self.store.read()?.stock_exists(product_id, deposit_id))
    }

    pub fn find(&self, product_id: ProductId, deposit_id: DepositId) -> DomainResult<Option<Stock>> {
        Ok(self.store.read()?.stock_for(product_id, deposit_id).cloned())
    }

    pub fn save(&self, req: SaveStock) -> DomainResult<Stock> {
        let product_id = req
            .product_id
            .ok_or_else(|| DomainError::validation("stock must be associated with a product"))?;
        let deposit_id = req
            .deposit_id
            .ok_or_else(|| DomainError::validation("stock must be associated with a deposit"))?;
        if req.quantity < 0 {
            return Err(DomainError::validation("stock quantity must not be negative"));
        }

        let mut uow = self.store.unit_of_work()?;

        if uow.product(product_id).is_none() {
            return Err(DomainError::not_found(format!("product {product_id} not found")));
        }
        if uow.deposit(deposit_id).is_none() {
            return Err(DomainError::not_found(format!("deposit {deposit_id} not found")));
        }

        let (saved, operation) = match req.id {
            None => {
                let row = insert_row(&mut uow, product_id, deposit_id, req.quantity)?;
                (row, AuditOperation::Create)
            }
            Some(id) => {
                let row = uow
                    .stock
                    .get_mut(id.as_i64())
                    .ok_or_else(|| DomainError::not_found(format!("stock {id} not found")))?;
                if row.product_id != product_id || row.deposit_id != deposit_id {
                    return Err(DomainError::validation(
                        "a stock row cannot be re-pointed at a different product or deposit",
                    ));
                }
                row.quantity = req.quantity;
                (row.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit.record("Stock", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    pub fn delete(&self, id: StockId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;
        remove_row(&mut uow, id)?;

        drop(uow);
        self.audit
            .record("Stock", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

/// Insert the first row for a (product, deposit) pair and apply both counter
/// effects: the product gained a deposit, the deposit gained a product.
///
/// The caller must have resolved the product and deposit already; a second
/// row for the same pair is a conflict.
pub(crate) fn insert_row(
    tables: &mut Tables,
    product_id: ProductId,
    deposit_id: DepositId,
    quantity: i64,
) -> DomainResult<Stock> {
    if tables.stock_exists(product_id, deposit_id) {
        return Err(DomainError::conflict(
            "this product already has stock in the selected deposit",
        ));
    }

    let raw = tables.stock.allocate();
    let row = Stock {
        id: StockId::new(raw),
        product_id,
        deposit_id,
        quantity,
    };
    tables.stock.insert(raw, row.clone());

    counters::increment_product_deposits(tables, product_id)?;
    counters::increment_deposit_products(tables, deposit_id)?;
    Ok(row)
}

/// Remove a ledger row and apply both counter effects.
///
/// The owning product or deposit may already be gone (their deletes do not
/// cascade into the ledger); a missing owner simply has no counter to touch.
pub(crate) fn remove_row(tables: &mut Tables, id: StockId) -> DomainResult<Stock> {
    let row = tables
        .stock
        .remove(id.as_i64())
        .ok_or_else(|| DomainError::not_found(format!("stock {id} not found")))?;

    if tables.product(row.product_id).is_some() {
        counters::decrement_product_deposits(tables, row.product_id)?;
    }
    if tables.deposit(row.deposit_id).is_some() {
        counters::decrement_deposit_products(tables, row.deposit_id)?;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Services;
    use crate::deposits::tests::save_deposit;
    use crate::products::tests::save_product;

    struct Fixture {
        services: Services,
        product_id: ProductId,
        deposit_id: DepositId,
    }

    fn fixture() -> Fixture {
        let services = Services::in_memory();
        let deposit = services.deposits.save(save_deposit("Central")).unwrap();
        let product = save_product(&services, "Hammer", &[]);
        Fixture {
            services,
            product_id: product.id,
            deposit_id: deposit.id,
        }
    }

    fn new_row(f: &Fixture, quantity: i64) -> DomainResult<Stock> {
        f.services.stock.save(SaveStock {
            id: None,
            product_id: Some(f.product_id),
            deposit_id: Some(f.deposit_id),
            quantity,
        })
    }

    #[test]
    fn creating_a_row_increments_both_counters() {
        let f = fixture();
        let row = new_row(&f, 10).unwrap();

        assert_eq!(row.quantity, 10);
        assert_eq!(f.services.products.get(f.product_id).unwrap().deposits_count, 1);
        assert_eq!(f.services.deposits.get(f.deposit_id).unwrap().product_count, 1);
    }

    #[test]
    fn second_row_for_the_same_pair_is_a_conflict() {
        let f = fixture();
        new_row(&f, 10).unwrap();

        let err = new_row(&f, 5).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Counters untouched by the failed insert.
        assert_eq!(f.services.products.get(f.product_id).unwrap().deposits_count, 1);
        assert_eq!(f.services.deposits.get(f.deposit_id).unwrap().product_count, 1);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let f = fixture();
        let err = new_row(&f, -1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_references_are_validation_unknown_ids_are_not_found() {
        let f = fixture();

        let err = f
            .services
            .stock
            .save(SaveStock {
                id: None,
                product_id: None,
                deposit_id: Some(f.deposit_id),
                quantity: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f
            .services
            .stock
            .save(SaveStock {
                id: None,
                product_id: Some(ProductId::new(999)),
                deposit_id: Some(f.deposit_id),
                quantity: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn update_changes_quantity_only() {
        let f = fixture();
        let row = new_row(&f, 10).unwrap();

        let updated = f
            .services
            .stock
            .save(SaveStock {
                id: Some(row.id),
                product_id: Some(f.product_id),
                deposit_id: Some(f.deposit_id),
                quantity: 3,
            })
            .unwrap();

        assert_eq!(updated.quantity, 3);
        // An update is not an insertion: counters stay put.
        assert_eq!(f.services.products.get(f.product_id).unwrap().deposits_count, 1);
    }

    #[test]
    fn update_cannot_repoint_the_row() {
        let f = fixture();
        let other = f.services.deposits.save(save_deposit("North")).unwrap();
        let row = new_row(&f, 10).unwrap();

        let err = f
            .services
            .stock
            .save(SaveStock {
                id: Some(row.id),
                product_id: Some(f.product_id),
                deposit_id: Some(other.id),
                quantity: 10,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn delete_removes_the_row_and_decrements_both_counters() {
        let f = fixture();
        let row = new_row(&f, 0).unwrap();

        f.services.stock.delete(row.id).unwrap();

        assert!(!f.services.stock.exists(f.product_id, f.deposit_id).unwrap());
        assert_eq!(f.services.products.get(f.product_id).unwrap().deposits_count, 0);
        assert_eq!(f.services.deposits.get(f.deposit_id).unwrap().product_count, 0);
    }

    #[test]
    fn delete_unknown_row_is_not_found() {
        let f = fixture();
        let err = f.services.stock.delete(StockId::new(42)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
