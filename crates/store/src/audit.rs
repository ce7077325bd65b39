//! Audit trail sink.

use std::sync::Mutex;

use chrono::Utc;

use stockroom_core::AuditLogId;
use stockroom_domain::{AuditLog, AuditOperation};

/// Write-only audit sink consumed by the services.
///
/// `record` is fire-and-forget: the primary operation never fails because the
/// audit trail does, and no response is consumed.
pub trait AuditSink: Send + Sync {
    fn record(
        &self,
        entity_name: &str,
        entity_id: i64,
        operation: AuditOperation,
        actor: Option<&str>,
    );
}

/// In-memory audit trail. Also serves the read side (`/audit-logs`).
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    rows: Mutex<Vec<AuditLog>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<AuditLog> {
        self.rows.lock().unwrap().clone()
    }

    pub fn for_entity(&self, entity_name: &str) -> Vec<AuditLog> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.entity_name == entity_name)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(
        &self,
        entity_name: &str,
        entity_id: i64,
        operation: AuditOperation,
        actor: Option<&str>,
    ) {
        let mut rows = self.rows.lock().unwrap();
        let id = AuditLogId::new(rows.len() as i64 + 1);

        tracing::debug!(
            entity = entity_name,
            entity_id,
            operation = operation.as_str(),
            "audit record"
        );

        rows.push(AuditLog {
            id,
            entity_name: entity_name.to_string(),
            entity_id,
            operation,
            username: actor.map(str::to_string),
            recorded_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_appended_in_order() {
        let sink = InMemoryAuditLog::new();
        sink.record("Brand", 1, AuditOperation::Create, None);
        sink.record("Brand", 1, AuditOperation::Update, Some("ana"));
        sink.record("Deposit", 2, AuditOperation::Delete, None);

        let all = sink.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].operation, AuditOperation::Create);
        assert_eq!(all[1].username.as_deref(), Some("ana"));
        assert_eq!(sink.for_entity("Brand").len(), 2);
        assert_eq!(sink.for_entity("Deposit").len(), 1);
    }
}
