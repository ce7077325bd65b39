use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::AuditLogId;

/// Operation recorded in the audit trail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Create => "CREATE",
            AuditOperation::Update => "UPDATE",
            AuditOperation::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit trail row. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub entity_name: String,
    pub entity_id: i64,
    pub operation: AuditOperation,
    pub username: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
