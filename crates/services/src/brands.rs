//! Brand lifecycle.

use std::sync::Arc;

use chrono::Utc;

use stockroom_core::{BrandId, DomainError, DomainResult};
use stockroom_domain::{AuditOperation, Brand};
use stockroom_store::{AuditSink, InMemoryStore};

/// Create-or-update request; create when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveBrand {
    pub id: Option<BrandId>,
    pub name: String,
    pub description: Option<String>,
    pub country: Option<String>,
}

pub struct BrandService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl BrandService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<Brand>> {
        Ok(self.store.read()?.brands.iter().cloned().collect())
    }

    pub fn get(&self, id: BrandId) -> DomainResult<Brand> {
        self.store
            .read()?
            .brand(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("brand {id} not found")))
    }

    pub fn save(&self, req: SaveBrand) -> DomainResult<Brand> {
        if req.name.trim().is_empty() {
            return Err(DomainError::validation("brand name is required"));
        }

        let mut uow = self.store.unit_of_work()?;

        let (saved, operation) = match req.id {
            None => {
                if uow.brand_by_name_ci(&req.name).is_some() {
                    return Err(DomainError::conflict(format!(
                        "a brand with the name '{}' already exists",
                        req.name
                    )));
                }

                let raw = uow.brands.allocate();
                let brand = Brand {
                    id: BrandId::new(raw),
                    name: req.name,
                    description: req.description,
                    country: req.country,
                    created_at: Utc::now(),
                    associated_product_count: 0,
                };
                uow.brands.insert(raw, brand.clone());
                (brand, AuditOperation::Create)
            }
            Some(id) => {
                let brand = uow
                    .brand_mut(id)
                    .ok_or_else(|| DomainError::not_found(format!("brand {id} not found")))?;
                brand.name = req.name;
                brand.description = req.description;
                brand.country = req.country;
                (brand.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit.record("Brand", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    pub fn delete(&self, id: BrandId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        if !uow.brands.contains(id.as_i64()) {
            return Err(DomainError::not_found(format!("brand {id} not found")));
        }
        if uow.any_product_with_brand(id) {
            return Err(DomainError::conflict(
                "cannot delete brand because it has associated products",
            ));
        }

        uow.brands.remove(id.as_i64());

        drop(uow);
        self.audit
            .record("Brand", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Services;
    use crate::products::tests::save_product_with;

    fn save_brand(name: &str) -> SaveBrand {
        SaveBrand {
            id: None,
            name: name.to_string(),
            description: None,
            country: None,
        }
    }

    #[test]
    fn create_initializes_counter_and_audits() {
        let services = Services::in_memory();
        let brand = services.brands.save(save_brand("Acme")).unwrap();

        assert_eq!(brand.associated_product_count, 0);

        let trail = services.audit_logs.for_entity("Brand");
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].operation, AuditOperation::Create);
        assert_eq!(trail[0].entity_id, brand.id.as_i64());
        assert_eq!(trail[0].username, None);
    }

    #[test]
    fn create_rejects_blank_name() {
        let services = Services::in_memory();
        let err = services.brands.save(save_brand("   ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn duplicate_name_is_case_insensitive() {
        let services = Services::in_memory();
        services.brands.save(save_brand("Acme")).unwrap();

        let err = services.brands.save(save_brand("ACME")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_resaves_and_audits() {
        let services = Services::in_memory();
        let brand = services.brands.save(save_brand("Acme")).unwrap();

        let updated = services
            .brands
            .save(SaveBrand {
                id: Some(brand.id),
                name: "Acme".to_string(),
                description: Some("tools".to_string()),
                country: Some("UY".to_string()),
            })
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("tools"));
        assert_eq!(updated.created_at, brand.created_at);

        let trail = services.audit_logs.for_entity("Brand");
        assert_eq!(trail[1].operation, AuditOperation::Update);
    }

    #[test]
    fn delete_unknown_brand_is_not_found() {
        let services = Services::in_memory();
        let err = services.brands.delete(BrandId::new(99)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn delete_is_blocked_while_products_reference_the_brand() {
        let services = Services::in_memory();
        let brand = services.brands.save(save_brand("Acme")).unwrap();
        save_product_with(&services, "Hammer", brand.id);

        let err = services.brands.delete(brand.id).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Nothing changed: the brand is still there, counter intact.
        let still = services.brands.get(brand.id).unwrap();
        assert_eq!(still.associated_product_count, 1);
    }

    #[test]
    fn delete_succeeds_once_unreferenced() {
        let services = Services::in_memory();
        let brand = services.brands.save(save_brand("Acme")).unwrap();
        let product = save_product_with(&services, "Hammer", brand.id);

        services.products.delete(product.id).unwrap();
        services.brands.delete(brand.id).unwrap();

        assert!(matches!(
            services.brands.get(brand.id),
            Err(DomainError::NotFound(_))
        ));
    }
}
