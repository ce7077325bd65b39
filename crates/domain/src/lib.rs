//! Inventory domain records.
//!
//! Plain entity types for the inventory system: reference data (brands,
//! categories, deposits, users), the product catalog, the stock ledger rows,
//! and the movement records. Pure data plus local invariant helpers (no IO,
//! no HTTP, no storage).

pub mod audit;
pub mod brand;
pub mod category;
pub mod deposit;
pub mod movement;
pub mod product;
pub mod stock;
pub mod user;

pub use audit::{AuditLog, AuditOperation};
pub use brand::Brand;
pub use category::Category;
pub use deposit::Deposit;
pub use movement::{MovementKind, MovementType, StockMovement};
pub use product::Product;
pub use stock::Stock;
pub use user::User;
