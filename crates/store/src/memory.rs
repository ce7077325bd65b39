//! Shared in-memory store with unit-of-work guards.

use std::ops::{Deref, DerefMut};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_core::{DomainError, DomainResult};

use crate::tables::Tables;

/// The process-wide store: one `RwLock` over all tables.
///
/// Every logical operation runs while holding the write guard, which
/// serializes the read-check-then-write sequences (uniqueness checks, counter
/// read-modify-write) that would otherwise lose updates under concurrency.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a unit of work covering one logical operation.
    pub fn unit_of_work(&self) -> DomainResult<UnitOfWork<'_>> {
        let guard = self
            .tables
            .write()
            .map_err(|_| DomainError::internal("store lock poisoned"))?;
        Ok(UnitOfWork(guard))
    }

    /// Read-only view for list/get operations.
    pub fn read(&self) -> DomainResult<Snapshot<'_>> {
        let guard = self
            .tables
            .read()
            .map_err(|_| DomainError::internal("store lock poisoned"))?;
        Ok(Snapshot(guard))
    }
}

/// Exclusive view of the tables for the duration of one logical operation.
pub struct UnitOfWork<'a>(RwLockWriteGuard<'a, Tables>);

impl Deref for UnitOfWork<'_> {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.0
    }
}

impl DerefMut for UnitOfWork<'_> {
    fn deref_mut(&mut self) -> &mut Tables {
        &mut self.0
    }
}

/// Shared read-only view of the tables.
pub struct Snapshot<'a>(RwLockReadGuard<'a, Tables>);

impl Deref for Snapshot<'_> {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.0
    }
}
