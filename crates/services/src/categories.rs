//! Category lifecycle.

use std::sync::Arc;

use stockroom_core::{CategoryId, DomainError, DomainResult};
use stockroom_domain::{AuditOperation, Category};
use stockroom_store::{AuditSink, InMemoryStore};

/// Create-or-update request; create when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveCategory {
    pub id: Option<CategoryId>,
    pub name: String,
}

pub struct CategoryService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl CategoryService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(self.store.read()?.categories.iter().cloned().collect())
    }

    pub fn get(&self, id: CategoryId) -> DomainResult<Category> {
        self.store
            .read()?
            .category(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("category {id} not found")))
    }

    pub fn save(&self, req: SaveCategory) -> DomainResult<Category> {
        if req.name.trim().is_empty() {
            return Err(DomainError::validation("category name is required"));
        }

        let mut uow = self.store.unit_of_work()?;

        let (saved, operation) = match req.id {
            None => {
                if uow.category_by_name_ci(&req.name).is_some() {
                    return Err(DomainError::conflict("category with that name already exists"));
                }

                let raw = uow.categories.allocate();
                let category = Category {
                    id: CategoryId::new(raw),
                    name: req.name,
                    associated_product_count: 0,
                };
                uow.categories.insert(raw, category.clone());
                (category, AuditOperation::Create)
            }
            Some(id) => {
                let category = uow
                    .category_mut(id)
                    .ok_or_else(|| DomainError::not_found(format!("category {id} not found")))?;
                category.name = req.name;
                (category.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit
            .record("Category", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    pub fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        if !uow.categories.contains(id.as_i64()) {
            return Err(DomainError::not_found(format!("category {id} not found")));
        }
        if uow.any_product_with_category(id) {
            return Err(DomainError::conflict(
                "cannot delete category because it is used by products",
            ));
        }

        uow.categories.remove(id.as_i64());

        drop(uow);
        self.audit
            .record("Category", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Services;

    #[test]
    fn duplicate_name_is_case_insensitive() {
        let services = Services::in_memory();
        services
            .categories
            .save(SaveCategory { id: None, name: "Tools".into() })
            .unwrap();

        let err = services
            .categories
            .save(SaveCategory { id: None, name: "tools".into() })
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn delete_unknown_category_is_not_found() {
        let services = Services::in_memory();
        let err = services.categories.delete(CategoryId::new(7)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
