//! `stockroom-services` — the inventory system's business operations.
//!
//! Four pieces live here:
//!
//! - [`counters`]: the denormalized aggregate counters on brands, categories,
//!   deposits and products (one counter, one call).
//! - [`stock`]: the authoritative (product, deposit) → quantity ledger.
//! - [`movements`]: the ENTRY/EXIT/TRANSFER state machine over that ledger.
//! - the entity lifecycle services ([`brands`], [`categories`], [`deposits`],
//!   [`products`], [`users`]) with uniqueness and referential-deletion rules.
//!
//! Every operation runs inside a single store unit of work, so the
//! check-then-write sequences (name uniqueness, counter read-modify-write)
//! are serialized per store. Audit records are emitted after the unit of work
//! commits, fire-and-forget.

use std::sync::Arc;

use stockroom_store::{AuditSink, InMemoryAuditLog, InMemoryStore};

pub mod audit_log;
pub mod brands;
pub mod categories;
pub mod counters;
pub mod deposits;
pub mod movements;
pub mod products;
pub mod stock;
pub mod users;

pub use audit_log::AuditLogService;
pub use brands::{BrandService, SaveBrand};
pub use categories::{CategoryService, SaveCategory};
pub use deposits::{DepositService, SaveDeposit};
pub use movements::{MovementRequest, MovementService};
pub use products::{ProductService, SaveProduct};
pub use stock::{SaveStock, StockService};
pub use users::{SaveUser, UserService};

/// All services wired over one shared store and one audit trail.
pub struct Services {
    pub brands: BrandService,
    pub categories: CategoryService,
    pub deposits: DepositService,
    pub products: ProductService,
    pub stock: StockService,
    pub movements: MovementService,
    pub users: UserService,
    pub audit_logs: AuditLogService,
}

impl Services {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<InMemoryAuditLog>) -> Self {
        let sink: Arc<dyn AuditSink> = audit.clone();
        Self {
            brands: BrandService::new(store.clone(), sink.clone()),
            categories: CategoryService::new(store.clone(), sink.clone()),
            deposits: DepositService::new(store.clone(), sink.clone()),
            products: ProductService::new(store.clone(), sink.clone()),
            stock: StockService::new(store.clone(), sink.clone()),
            movements: MovementService::new(store.clone(), sink.clone()),
            users: UserService::new(store, sink),
            audit_logs: AuditLogService::new(audit),
        }
    }

    /// Fresh store and audit trail (dev server, tests).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Arc::new(InMemoryAuditLog::new()))
    }
}
