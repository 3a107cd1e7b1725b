//! Audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

wire_enum! {
    AuditAction {
        Insert => "INSERT",
        Update => "UPDATE",
        Delete => "DELETE",
    }
}

/// Tables whose mutations are recorded.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const CRIMES: &str = "crimes";
    pub const INVESTIGATIONS: &str = "investigations";
    pub const CRIMINAL_RECORDS: &str = "criminal_records";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub action: AuditAction,
    pub table_name: String,
    pub record_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub changes: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.action.as_str().to_lowercase().contains(&needle)
            || self.table_name.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogView {
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    pub user_name: Option<String>,
}
