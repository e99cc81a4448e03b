//! Feature modules implementing the CRM API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes. Handlers depend on repository traits, never on a concrete pool.
//!
//! # Features
//!
//! - **customers**: customer CRUD and paged listing
//! - **audit_entries**: paged listing of the audit trail
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Request and response bodies (if needed)

pub mod audit_entries;
pub mod customers;
pub mod shared;

use axum::{http::Method, Router};
use std::sync::Arc;

use crate::audit::{AuditAction, AuditRegistry};
use crate::db::{AuditRepository, CustomerRepository};

pub const CUSTOMERS_PATH: &str = "/api/customers";
pub const AUDIT_ENTRIES_PATH: &str = "/api/audit-entries";

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub customers: Arc<dyn CustomerRepository>,
    pub audit_entries: Arc<dyn AuditRepository>,
}

/// Creates the API router with all feature routes mounted
///
/// - `/api/customers` - Customer management
/// - `/api/audit-entries` - Audit trail
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest(CUSTOMERS_PATH, customers::customers_routes())
        .nest(AUDIT_ENTRIES_PATH, audit_entries::audit_entries_routes())
        .with_state(state)
}

/// The audited customer mutations.
pub fn audit_registry() -> AuditRegistry {
    AuditRegistry::new()
        .register(Method::POST, CUSTOMERS_PATH, AuditAction::Create)
        .register(Method::PUT, "/api/customers/:id", AuditAction::Update)
        .register(Method::DELETE, "/api/customers/:id", AuditAction::Delete)
}
