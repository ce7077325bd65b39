//! Product lifecycle.
//!
//! Product creation is the one lifecycle operation with ledger side effects:
//! an initial deposit set turns into quantity-0 stock rows, created through
//! the ledger so every counter comes out consistent. The deposit set itself
//! is derived from the ledger on read and never stored on the product.

use std::sync::Arc;

use stockroom_core::{
    BrandId, CategoryId, DepositId, DomainError, DomainResult, Money, ProductId,
};
use stockroom_domain::{AuditOperation, Product};
use stockroom_store::{AuditSink, InMemoryStore};

use crate::{counters, stock};

/// Create-or-update request; create when `id` is absent.
///
/// `deposit_ids` is only honored on create; unknown ids are skipped and
/// duplicates collapse.
#[derive(Debug, Clone)]
pub struct SaveProduct {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
    pub deposit_ids: Vec<DepositId>,
}

pub struct ProductService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl ProductService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.store.read()?.products.iter().cloned().collect())
    }

    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.store
            .read()?
            .product(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {id} not found")))
    }

    /// The deposits the product currently has stock rows in, derived from the
    /// ledger.
    pub fn deposits_of(&self, id: ProductId) -> DomainResult<Vec<DepositId>> {
        let snapshot = self.store.read()?;
        if snapshot.product(id).is_none() {
            return Err(DomainError::not_found(format!("product {id} not found")));
        }
        Ok(snapshot.deposits_for_product(id))
    }

    pub fn save(&self, req: SaveProduct) -> DomainResult<Product> {
        if req.name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        let brand_id = req
            .brand_id
            .ok_or_else(|| DomainError::validation("product brand is required"))?;
        let category_id = req
            .category_id
            .ok_or_else(|| DomainError::validation("product category is required"))?;
        let purchase_price = req
            .purchase_price
            .ok_or_else(|| DomainError::validation("product purchase price is required"))?;
        let sale_price = req
            .sale_price
            .ok_or_else(|| DomainError::validation("product sale price is required"))?;

        let mut uow = self.store.unit_of_work()?;

        if req.id.is_none() && uow.product_by_name_ci(&req.name).is_some() {
            return Err(DomainError::conflict(format!(
                "product with name '{}' already exists",
                req.name
            )));
        }

        if uow.brand(brand_id).is_none() {
            return Err(DomainError::not_found(format!("brand {brand_id} not found")));
        }
        if uow.category(category_id).is_none() {
            return Err(DomainError::not_found(format!("category {category_id} not found")));
        }

        let (saved, operation) = match req.id {
            None => {
                let raw = uow.products.allocate();
                let product_id = ProductId::new(raw);
                let product = Product {
                    id: product_id,
                    name: req.name,
                    description: req.description,
                    purchase_price,
                    sale_price,
                    brand_id,
                    category_id,
                    deposits_count: 0,
                };
                uow.products.insert(raw, product);

                // Initial deposit set: unknown ids are skipped, duplicates
                // collapse. Each resolved deposit becomes a quantity-0 ledger
                // row, which carries the counter effects.
                let mut resolved: Vec<DepositId> = Vec::new();
                for deposit_id in req.deposit_ids {
                    if resolved.contains(&deposit_id) || uow.deposit(deposit_id).is_none() {
                        continue;
                    }
                    resolved.push(deposit_id);
                    stock::insert_row(&mut uow, product_id, deposit_id, 0)?;
                }

                counters::increment_brand_products(&mut uow, brand_id)?;
                counters::increment_category_products(&mut uow, category_id)?;

                let product = uow
                    .product(product_id)
                    .cloned()
                    .ok_or_else(|| DomainError::internal("product row vanished mid-operation"))?;
                (product, AuditOperation::Create)
            }
            Some(id) => {
                // Re-save of scalar fields; deposits and every counter are
                // untouched, even if the brand or category reference changed.
                let product = uow
                    .product_mut(id)
                    .ok_or_else(|| DomainError::not_found(format!("product {id} not found")))?;
                product.name = req.name;
                product.description = req.description;
                product.purchase_price = purchase_price;
                product.sale_price = sale_price;
                product.brand_id = brand_id;
                product.category_id = category_id;
                (product.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit
            .record("Product", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    /// Deletes the product and decrements its brand's and category's counters
    /// unconditionally; the counts are not re-derived. Stock rows referencing
    /// the product are left in place.
    pub fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        let product = uow
            .products
            .remove(id.as_i64())
            .ok_or_else(|| DomainError::not_found(format!("product {id} not found")))?;

        counters::decrement_brand_products(&mut uow, product.brand_id)?;
        counters::decrement_category_products(&mut uow, product.category_id)?;

        drop(uow);
        self.audit
            .record("Product", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Services;
    use crate::deposits::tests::save_deposit;
    use rust_decimal::Decimal;

    pub(crate) fn prices() -> (Money, Money) {
        (
            Money::new("USD", Decimal::new(750, 2)),
            Money::new("USD", Decimal::new(1299, 2)),
        )
    }

    /// A product under a fresh brand + category pair named after it.
    pub(crate) fn save_product(
        services: &Services,
        name: &str,
        deposit_ids: &[DepositId],
    ) -> Product {
        let brand = services
            .brands
            .save(crate::brands::SaveBrand {
                id: None,
                name: format!("{name} brand"),
                description: None,
                country: None,
            })
            .unwrap();
        save_product_in(services, name, brand.id, deposit_ids)
    }

    /// A product under an existing brand (fresh category).
    pub(crate) fn save_product_with(
        services: &Services,
        name: &str,
        brand_id: BrandId,
    ) -> Product {
        save_product_in(services, name, brand_id, &[])
    }

    fn save_product_in(
        services: &Services,
        name: &str,
        brand_id: BrandId,
        deposit_ids: &[DepositId],
    ) -> Product {
        let category = services
            .categories
            .save(crate::categories::SaveCategory {
                id: None,
                name: format!("{name} category"),
            })
            .unwrap();
        let (purchase, sale) = prices();
        services
            .products
            .save(SaveProduct {
                id: None,
                name: name.to_string(),
                description: None,
                purchase_price: Some(purchase),
                sale_price: Some(sale),
                brand_id: Some(brand_id),
                category_id: Some(category.id),
                deposit_ids: deposit_ids.to_vec(),
            })
            .unwrap()
    }

    #[test]
    fn creation_with_initial_deposit_creates_ledger_row_and_counters() {
        let services = Services::in_memory();
        let d1 = services.deposits.save(save_deposit("D1")).unwrap();

        let product = save_product(&services, "Hammer", &[d1.id]);

        assert_eq!(product.deposits_count, 1);
        assert_eq!(services.deposits.get(d1.id).unwrap().product_count, 1);

        let row = services.stock.find(product.id, d1.id).unwrap().unwrap();
        assert_eq!(row.quantity, 0);
        assert_eq!(services.products.deposits_of(product.id).unwrap(), vec![d1.id]);
    }

    #[test]
    fn unknown_and_duplicate_initial_deposits_are_skipped() {
        let services = Services::in_memory();
        let d1 = services.deposits.save(save_deposit("D1")).unwrap();

        let product = save_product(&services, "Hammer", &[d1.id, DepositId::new(99), d1.id]);

        assert_eq!(product.deposits_count, 1);
        assert_eq!(services.deposits.get(d1.id).unwrap().product_count, 1);
    }

    #[test]
    fn creation_increments_brand_and_category_counters() {
        let services = Services::in_memory();
        let product = save_product(&services, "Hammer", &[]);

        assert_eq!(
            services.brands.get(product.brand_id).unwrap().associated_product_count,
            1
        );
        assert_eq!(
            services
                .categories
                .get(product.category_id)
                .unwrap()
                .associated_product_count,
            1
        );
    }

    #[test]
    fn duplicate_name_is_case_insensitive() {
        let services = Services::in_memory();
        save_product(&services, "Hammer", &[]);

        let brand = services
            .brands
            .save(crate::brands::SaveBrand {
                id: None,
                name: "Other".to_string(),
                description: None,
                country: None,
            })
            .unwrap();
        let category = services
            .categories
            .save(crate::categories::SaveCategory {
                id: None,
                name: "Other".to_string(),
            })
            .unwrap();
        let (purchase, sale) = prices();

        let err = services
            .products
            .save(SaveProduct {
                id: None,
                name: "HAMMER".to_string(),
                description: None,
                purchase_price: Some(purchase),
                sale_price: Some(sale),
                brand_id: Some(brand.id),
                category_id: Some(category.id),
                deposit_ids: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn missing_brand_is_validation_unknown_brand_is_not_found() {
        let services = Services::in_memory();
        let category = services
            .categories
            .save(crate::categories::SaveCategory {
                id: None,
                name: "Tools".to_string(),
            })
            .unwrap();
        let (purchase, sale) = prices();

        let base = SaveProduct {
            id: None,
            name: "Hammer".to_string(),
            description: None,
            purchase_price: Some(purchase),
            sale_price: Some(sale),
            brand_id: None,
            category_id: Some(category.id),
            deposit_ids: vec![],
        };

        let err = services.products.save(base.clone()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = services
            .products
            .save(SaveProduct {
                brand_id: Some(BrandId::new(42)),
                ..base
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn delete_decrements_brand_and_category_counters() {
        let services = Services::in_memory();
        let product = save_product(&services, "Hammer", &[]);

        services.products.delete(product.id).unwrap();

        assert_eq!(
            services.brands.get(product.brand_id).unwrap().associated_product_count,
            0
        );
        assert_eq!(
            services
                .categories
                .get(product.category_id)
                .unwrap()
                .associated_product_count,
            0
        );
    }

    #[test]
    fn delete_leaves_stock_rows_behind() {
        let services = Services::in_memory();
        let d1 = services.deposits.save(save_deposit("D1")).unwrap();
        let product = save_product(&services, "Hammer", &[d1.id]);

        services.products.delete(product.id).unwrap();

        // No referential check on product delete: the row is orphaned and the
        // deposit counter is not repaired.
        let rows = services.stock.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id, product.id);
        assert_eq!(services.deposits.get(d1.id).unwrap().product_count, 1);
    }

    #[test]
    fn update_does_not_touch_counters_or_deposits() {
        let services = Services::in_memory();
        let d1 = services.deposits.save(save_deposit("D1")).unwrap();
        let product = save_product(&services, "Hammer", &[d1.id]);
        let (purchase, sale) = prices();

        let updated = services
            .products
            .save(SaveProduct {
                id: Some(product.id),
                name: "Sledgehammer".to_string(),
                description: Some("heavy".to_string()),
                purchase_price: Some(purchase),
                sale_price: Some(sale),
                brand_id: Some(product.brand_id),
                category_id: Some(product.category_id),
                deposit_ids: vec![],
            })
            .unwrap();

        assert_eq!(updated.name, "Sledgehammer");
        assert_eq!(updated.deposits_count, 1);
        assert_eq!(
            services.brands.get(product.brand_id).unwrap().associated_product_count,
            1
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: over any sequence of product creations and deletions,
            /// the brand and category counters equal the number of currently
            /// existing products referencing them.
            #[test]
            fn counters_track_live_products(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
                let services = Services::in_memory();
                let brand = services
                    .brands
                    .save(crate::brands::SaveBrand {
                        id: None,
                        name: "Acme".to_string(),
                        description: None,
                        country: None,
                    })
                    .unwrap();
                let category = services
                    .categories
                    .save(crate::categories::SaveCategory {
                        id: None,
                        name: "Tools".to_string(),
                    })
                    .unwrap();

                let mut live: Vec<ProductId> = Vec::new();
                let mut n = 0u32;

                for create in ops {
                    if create {
                        n += 1;
                        let (purchase, sale) = prices();
                        let product = services
                            .products
                            .save(SaveProduct {
                                id: None,
                                name: format!("p{n}"),
                                description: None,
                                purchase_price: Some(purchase),
                                sale_price: Some(sale),
                                brand_id: Some(brand.id),
                                category_id: Some(category.id),
                                deposit_ids: vec![],
                            })
                            .unwrap();
                        live.push(product.id);
                    } else if let Some(id) = live.pop() {
                        services.products.delete(id).unwrap();
                    } else {
                        // Deleting with nothing live must not drive counters
                        // negative either.
                        prop_assert!(services.products.delete(ProductId::new(9999)).is_err());
                    }

                    let count = live.len() as u32;
                    prop_assert_eq!(
                        services.brands.get(brand.id).unwrap().associated_product_count,
                        count
                    );
                    prop_assert_eq!(
                        services.categories.get(category.id).unwrap().associated_product_count,
                        count
                    );
                }
            }
        }
    }
}
