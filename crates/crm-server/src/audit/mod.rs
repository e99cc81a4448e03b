//! Audit trail for customer mutations
//!
//! Each create, update and delete request on `/api/customers` produces
//! exactly one [`AuditEntry`], whatever the outcome. Reads are not audited.
//!
//! # Pieces
//!
//! - [`AuditRegistry`]: which `(method, route)` pairs are audited, and with
//!   which action label
//! - [`AuditLayer`]: tower middleware that buffers the body, builds the
//!   per-request [`AuditContext`] and records the outcome
//! - [`record_audit_entry`]: appends an entry through an
//!   [`AuditRepository`](crate::db::AuditRepository)
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{http::Method, Router};
//! use crm_server::audit::{AuditAction, AuditLayer, AuditRegistry};
//! use crm_server::db::PgAuditRepository;
//!
//! # fn example(pool: sqlx::PgPool) -> Router {
//! let registry = AuditRegistry::new()
//!     .register(Method::POST, "/api/customers", AuditAction::Create);
//!
//! Router::new().layer(AuditLayer::new(
//!     Arc::new(PgAuditRepository::new(pool)),
//!     registry,
//!     1024 * 1024,
//! ))
//! # }
//! ```

mod middleware;
mod models;
mod recorder;
mod registry;


pub use middleware::{body_snapshot, classify, AuditContext, AuditLayer, AuditMiddleware};
pub use models::{AuditAction, AuditEntry, AuditStatus, NewAuditEntry};
pub use recorder::record_audit_entry;
pub use registry::{AuditMatch, AuditRegistry};
