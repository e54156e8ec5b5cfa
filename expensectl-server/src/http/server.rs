//! Axum server setup
//!
//! Server skeleton with:
//! - Basic auth on expense routes, `/health` left open
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, bounded by a drain deadline

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::trace::TraceLayer;

use super::auth::{self, Credentials};
use super::routes;
use crate::db::ExpenseStore;

/// Default listen address, matching the port the service has always used.
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 2565);

/// How long in-flight requests get to finish once shutdown starts.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:2565)
    pub bind_addr: SocketAddr,

    /// Basic-auth credentials required on every expense route
    pub credentials: Credentials,

    /// Drain deadline after a shutdown signal (default: 10s)
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            credentials: Credentials::default(),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn ExpenseStore>,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(store: Arc<dyn ExpenseStore>, credentials: Credentials) -> Self {
        Self { store, credentials }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::expenses::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ))
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&database_url, &PoolSettings::default()).await?;
/// init_schema(&pool).await?;
/// let store = Arc::new(PgExpenseStore::new(pool));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn ExpenseStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    serve(listener, store, config, shutdown_signal()).await
}

/// Serve on a bound listener until `shutdown` resolves.
///
/// In-flight requests then get `config.shutdown_timeout` to complete; any
/// connection still open after that is dropped.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<dyn ExpenseStore>,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = config.shutdown_timeout;
    let app = build_router(AppState::new(store, config.credentials));

    let draining = Arc::new(Notify::new());
    let signal = {
        let draining = draining.clone();
        async move {
            shutdown.await;
            draining.notify_one();
        }
    };
    let deadline = async {
        draining.notified().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = axum::serve(listener, app).with_graceful_shutdown(signal).into_future() => result?,
        _ = deadline => {
            tracing::warn!(?shutdown_timeout, "Drain deadline passed, dropping open connections");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, draining in-flight requests");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, draining in-flight requests");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
