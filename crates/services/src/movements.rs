//! Movement Processor: validates and applies ENTRY/EXIT/TRANSFER movements.
//!
//! Each movement is processed to completion inside one unit of work, or
//! fails; there is no persisted in-flight state. Ledger housekeeping is
//! driven purely by row *presence* and by quantities that are *already*
//! zero: the movement's own quantity is recorded for audit and never
//! applied to a row.

use std::sync::Arc;

use chrono::Utc;

use stockroom_core::{DepositId, DomainError, DomainResult, MovementId, ProductId, UserId};
use stockroom_domain::{AuditOperation, MovementKind, MovementType, StockMovement};
use stockroom_store::{AuditSink, InMemoryStore, Tables};

use crate::{counters, stock};

/// Wire-shaped movement request. `movement_type` and `product_id` are
/// optional so that their absence stays a validation failure, distinct from
/// an unknown id (not found).
#[derive(Debug, Clone)]
pub struct MovementRequest {
    pub movement_type: Option<MovementType>,
    pub product_id: Option<ProductId>,
    pub origin_deposit_id: Option<DepositId>,
    pub destination_deposit_id: Option<DepositId>,
    pub quantity: i64,
    pub user_id: Option<UserId>,
}

pub struct MovementService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl MovementService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<StockMovement>> {
        Ok(self.store.read()?.movements.iter().cloned().collect())
    }

    pub fn get(&self, id: MovementId) -> DomainResult<StockMovement> {
        self.store
            .read()?
            .movement(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("stock movement {id} not found")))
    }

    pub fn by_type(&self, movement_type: MovementType) -> DomainResult<Vec<StockMovement>> {
        Ok(self
            .store
            .read()?
            .movements
            .iter()
            .filter(|m| m.movement_type() == movement_type)
            .cloned()
            .collect())
    }

    pub fn by_origin_deposit(&self, deposit_id: DepositId) -> DomainResult<Vec<StockMovement>> {
        Ok(self
            .store
            .read()?
            .movements
            .iter()
            .filter(|m| m.origin() == Some(deposit_id))
            .cloned()
            .collect())
    }

    pub fn by_destination_deposit(&self, deposit_id: DepositId) -> DomainResult<Vec<StockMovement>> {
        Ok(self
            .store
            .read()?
            .movements
            .iter()
            .filter(|m| m.destination() == Some(deposit_id))
            .cloned()
            .collect())
    }

    /// Movements leaving `origin` for `destination`; only transfers carry
    /// both deposits.
    pub fn transfers_between(
        &self,
        origin: DepositId,
        destination: DepositId,
    ) -> DomainResult<Vec<StockMovement>> {
        Ok(self
            .store
            .read()?
            .movements
            .iter()
            .filter(|m| m.origin() == Some(origin) && m.destination() == Some(destination))
            .cloned()
            .collect())
    }

    /// Validate and apply one movement.
    pub fn apply(&self, req: MovementRequest) -> DomainResult<StockMovement> {
        let product_id = req
            .product_id
            .ok_or_else(|| DomainError::validation("movement product is required"))?;
        let movement_type = req
            .movement_type
            .ok_or_else(|| DomainError::validation("movement type is required"))?;
        if req.quantity < 0 {
            return Err(DomainError::validation("movement quantity must not be negative"));
        }

        // Type preconditions: the closed kind carries its required deposits.
        let kind = MovementKind::from_parts(
            movement_type,
            req.origin_deposit_id,
            req.destination_deposit_id,
        )?;

        let mut uow = self.store.unit_of_work()?;

        // Resolution: every reference must point at a persisted entity.
        if uow.product(product_id).is_none() {
            return Err(DomainError::not_found(format!("product {product_id} not found")));
        }
        if let Some(origin) = kind.origin() {
            if uow.deposit(origin).is_none() {
                return Err(DomainError::not_found(format!(
                    "origin deposit {origin} not found"
                )));
            }
        }
        if let Some(destination) = kind.destination() {
            if uow.deposit(destination).is_none() {
                return Err(DomainError::not_found(format!(
                    "destination deposit {destination} not found"
                )));
            }
        }
        if let Some(user_id) = req.user_id {
            if uow.user(user_id).is_none() {
                return Err(DomainError::not_found(format!("user {user_id} not found")));
            }
        }

        let raw = uow.movements.allocate();
        let movement = StockMovement {
            id: MovementId::new(raw),
            kind,
            product_id,
            quantity: req.quantity,
            moved_at: Utc::now(),
            user_id: req.user_id,
        };
        uow.movements.insert(raw, movement.clone());

        match kind {
            MovementKind::Entry { destination } => {
                entry_bookkeeping(&mut uow, product_id, destination)?;
            }
            MovementKind::Exit { origin } => {
                exit_cleanup(&mut uow, product_id, origin)?;
            }
            MovementKind::Transfer { origin, destination } => {
                exit_cleanup(&mut uow, product_id, origin)?;
                entry_bookkeeping(&mut uow, product_id, destination)?;
            }
        }

        drop(uow);

        tracing::debug!(
            movement = raw,
            kind = movement.movement_type().as_str(),
            product = product_id.as_i64(),
            quantity = movement.quantity,
            "movement applied"
        );
        self.audit
            .record("StockMovement", raw, AuditOperation::Create, None);
        Ok(movement)
    }

    /// Remove a movement record. Purely archival: ledger rows and counters
    /// are untouched.
    pub fn delete(&self, id: MovementId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        if uow.movements.remove(id.as_i64()).is_none() {
            return Err(DomainError::not_found(format!("stock movement {id} not found")));
        }

        drop(uow);
        self.audit
            .record("StockMovement", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

/// Entry side: the product gains presence in the destination only if no row
/// exists there yet. The row itself is not created here.
fn entry_bookkeeping(
    tables: &mut Tables,
    product_id: ProductId,
    destination: DepositId,
) -> DomainResult<()> {
    if !tables.stock_exists(product_id, destination) {
        counters::increment_product_deposits(tables, product_id)?;
    }
    Ok(())
}

/// Exit side: a row whose quantity is already zero is dropped, taking both
/// counters down with it.
fn exit_cleanup(tables: &mut Tables, product_id: ProductId, origin: DepositId) -> DomainResult<()> {
    let empty_row = tables
        .stock_for(product_id, origin)
        .filter(|row| row.quantity == 0)
        .map(|row| row.id);

    if let Some(id) = empty_row {
        stock::remove_row(tables, id)?;
    }
    Ok(())
}
