//! Audit data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit entry as stored and as returned by `/api/audit-entries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: i64,
    /// Free-text action label, e.g. `CREATE`
    pub action: String,
    /// Customer the request targeted, when the route carries one
    pub customer_id: Option<i64>,
    /// Compacted request body, absent for empty bodies
    pub request: Option<String>,
    /// `SUCCESS` or `FAILED`
    pub status: String,
    pub creation_datetime: DateTime<Utc>,
}

/// Actions produced by the customer routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditStatus {
    Success,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry to append. The timestamp is taken when the value is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub action: AuditAction,
    pub customer_id: Option<i64>,
    pub request: Option<String>,
    pub status: AuditStatus,
    pub creation_datetime: DateTime<Utc>,
}

impl NewAuditEntry {
    pub fn new(action: AuditAction, status: AuditStatus) -> Self {
        Self {
            action,
            customer_id: None,
            request: None,
            status,
            creation_datetime: Utc::now(),
        }
    }

    pub fn customer_id(mut self, customer_id: Option<i64>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn request(mut self, request: Option<String>) -> Self {
        self.request = request;
        self
    }
}
