//! CRM Server - Main entry point

use anyhow::Result;
use crm_common::logging::{init_logging, LogConfig};
use tracing::info;

use crm_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("crm-server")
        .filter_directives("crm_server=debug,tower_http=debug,sqlx=warn")
        .build()
        // Environment variables take precedence
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting CRM Server");

    let config = Config::load()?;
    info!("Configuration loaded - server will bind to {}", config.bind_address());

    api::serve(config).await
}
