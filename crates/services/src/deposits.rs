//! Deposit (warehouse) lifecycle.

use std::sync::Arc;

use chrono::Utc;

use stockroom_core::{DepositId, DomainError, DomainResult};
use stockroom_domain::{AuditOperation, Deposit};
use stockroom_store::{AuditSink, InMemoryStore};

/// Create-or-update request; create when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveDeposit {
    pub id: Option<DepositId>,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

pub struct DepositService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl DepositService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<Deposit>> {
        Ok(self.store.read()?.deposits.iter().cloned().collect())
    }

    pub fn get(&self, id: DepositId) -> DomainResult<Deposit> {
        self.store
            .read()?
            .deposit(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("deposit {id} not found")))
    }

    pub fn save(&self, req: SaveDeposit) -> DomainResult<Deposit> {
        if req.name.trim().is_empty() {
            return Err(DomainError::validation("deposit name is required"));
        }

        let mut uow = self.store.unit_of_work()?;

        let (saved, operation) = match req.id {
            None => {
                if uow.deposit_by_name_ci(&req.name).is_some() {
                    return Err(DomainError::conflict(format!(
                        "deposit with name '{}' already exists",
                        req.name
                    )));
                }

                let raw = uow.deposits.allocate();
                let deposit = Deposit {
                    id: DepositId::new(raw),
                    name: req.name,
                    location: req.location,
                    description: req.description,
                    product_count: 0,
                    associated_at: Utc::now(),
                };
                uow.deposits.insert(raw, deposit.clone());
                (deposit, AuditOperation::Create)
            }
            Some(id) => {
                let deposit = uow
                    .deposit_mut(id)
                    .ok_or_else(|| DomainError::not_found(format!("deposit {id} not found")))?;
                deposit.name = req.name;
                deposit.location = req.location;
                deposit.description = req.description;
                // The associated timestamp is refreshed on every update.
                deposit.associated_at = Utc::now();
                (deposit.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit
            .record("Deposit", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    /// Deletes the deposit without checking for stock rows referencing it;
    /// rows left behind keep pointing at the dead id.
    pub fn delete(&self, id: DepositId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        if uow.deposits.remove(id.as_i64()).is_none() {
            return Err(DomainError::not_found(format!("deposit {id} not found")));
        }

        drop(uow);
        self.audit
            .record("Deposit", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}
