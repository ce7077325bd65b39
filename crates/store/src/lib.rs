//! `stockroom-store` — persistence collaborator for the inventory services.
//!
//! An in-memory relational store: one table per entity with store-allocated
//! integer ids, the predicate lookups the services need (case-insensitive
//! name/email, existence by foreign id, the (product, deposit) ledger key),
//! unit-of-work guards, and the audit trail sink.

pub mod audit;
pub mod memory;
pub mod tables;

pub use audit::{AuditSink, InMemoryAuditLog};
pub use memory::{InMemoryStore, Snapshot, UnitOfWork};
pub use tables::{Table, Tables};
