//! Read access to the audit trail under `/api/audit-entries`.

pub mod queries;
pub mod routes;

pub use queries::{ListAuditEntriesError, ListAuditEntriesQuery};
pub use routes::audit_entries_routes;
