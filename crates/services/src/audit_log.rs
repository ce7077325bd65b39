//! Audit trail read side.

use std::sync::Arc;

use stockroom_domain::AuditLog;
use stockroom_store::InMemoryAuditLog;

pub struct AuditLogService {
    log: Arc<InMemoryAuditLog>,
}

impl AuditLogService {
    pub fn new(log: Arc<InMemoryAuditLog>) -> Self {
        Self { log }
    }

    pub fn list(&self) -> Vec<AuditLog> {
        self.log.all()
    }

    pub fn for_entity(&self, entity_name: &str) -> Vec<AuditLog> {
        self.log.for_entity(entity_name)
    }
}
