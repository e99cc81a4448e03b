//! Appending audit entries

use super::models::{AuditEntry, NewAuditEntry};
use crate::db::AuditRepository;

/// Append one entry.
///
/// Storage failures are logged and swallowed; they never change the
/// response already produced for the client.
pub async fn record_audit_entry(
    repository: &dyn AuditRepository,
    entry: NewAuditEntry,
) -> Option<AuditEntry> {
    match repository.insert(&entry).await {
        Ok(stored) => {
            tracing::info!(
                audit_id = stored.id,
                action = %entry.action,
                customer_id = ?entry.customer_id,
                status = %entry.status,
                "Audit entry recorded"
            );
            Some(stored)
        },
        Err(e) => {
            tracing::error!(
                error = %e,
                action = %entry.action,
                customer_id = ?entry.customer_id,
                status = %entry.status,
                "Failed to record audit entry"
            );
            None
        },
    }
}
