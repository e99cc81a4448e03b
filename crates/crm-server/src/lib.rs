//! CRM Server Library
//!
//! HTTP backend for managing customer records with an audit trail.
//!
//! # Overview
//!
//! - **Customers**: create, read, update, delete and paged, sorted listing
//! - **Audit trail**: every customer mutation appends one entry recording
//!   the action, the targeted customer, the request body and the outcome
//! - **Database**: PostgreSQL through SQLx repositories
//! - **Middleware**: CORS, request tracing, compression and panic recovery
//!
//! # Architecture
//!
//! Features are vertical slices under [`features`], split into commands
//! (writes) and queries (reads). Handlers talk to repository traits from
//! [`db`]; the [`audit`] layer wraps the router and records mutations
//! without the handlers having to cooperate.
//!
//! # Example
//!
//! ```no_run
//! use crm_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

pub use error::{AppError, AppResult};
