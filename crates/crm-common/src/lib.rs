//! CRM Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Ambient concerns shared by the CRM workspace members. Today that is the
//! process-wide logging setup; the server crate owns everything else.
//!
//! ```no_run
//! use crm_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingGuard};
