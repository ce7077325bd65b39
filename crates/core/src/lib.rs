//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{AuditLogId, BrandId, CategoryId, DepositId, MovementId, ProductId, StockId, UserId};
pub use money::Money;
