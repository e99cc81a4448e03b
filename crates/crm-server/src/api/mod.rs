//! HTTP surface: router assembly and the server loop

pub mod response;

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::compression::CompressionLayer;
use tracing::{info, warn};

use crate::audit::AuditLayer;
use crate::config::Config;
use crate::db::{self, PgAuditRepository, PgCustomerRepository};
use crate::error::{AppError, RESOURCE_NOT_FOUND_MESSAGE};
use crate::features::{self, FeatureState};
use crate::middleware;

/// Connect, migrate and serve until a shutdown signal arrives.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config.database).await?;
    db::health_check(&pool).await?;

    db::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    let state = FeatureState {
        customers: Arc::new(PgCustomerRepository::new(pool.clone())),
        audit_entries: Arc::new(PgAuditRepository::new(pool)),
    };
    let app = create_router(state, &config);

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    serve_until(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await?;

    info!("Server shut down");

    Ok(())
}

/// Serve until `signal` resolves, then drain open connections for at most
/// `drain_timeout`.
async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let notify = draining.clone();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            notify.notify_one();
        })
        .into_future();

    let deadline = async {
        draining.notified().await;
        info!("Waiting up to {} seconds for connections to close", drain_timeout.as_secs());
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result,
        _ = deadline => {
            warn!("Connections still open after {} seconds, shutting down", drain_timeout.as_secs());
            Ok(())
        },
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    let audit_layer = AuditLayer::new(
        state.audit_entries.clone(),
        features::audit_registry(),
        config.audit.max_body_bytes,
    );

    Router::new()
        .route("/health", get(health))
        .merge(features::router(state))
        .fallback(not_found)
        // Apply layers from innermost to outermost
        .layer(middleware::catch_panic_layer())
        .layer(audit_layer)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound(RESOURCE_NOT_FOUND_MESSAGE.to_string())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
