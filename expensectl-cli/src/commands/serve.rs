//! HTTP server command
//!
//! Connects to PostgreSQL, ensures the schema exists, then serves the
//! expense API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use expensectl_server::db::{connect, init_schema, PoolSettings};
use expensectl_server::{run_server, Credentials, PgExpenseStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:2565")]
    pub bind: SocketAddr,

    /// Port override for the bind address (accepts "2565" or ":2565")
    #[arg(long, env = "PORT", value_parser = parse_port)]
    pub port: Option<u16>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = PoolSettings::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a database connection before giving up
    #[arg(
        long,
        env = "DATABASE_ACQUIRE_TIMEOUT_SECS",
        default_value_t = PoolSettings::DEFAULT_ACQUIRE_TIMEOUT.as_secs()
    )]
    pub acquire_timeout_secs: u64,

    /// Basic-auth username required on every request
    #[arg(long, env = "AUTH_USERNAME", default_value = "admin")]
    pub auth_username: String,

    /// Basic-auth password required on every request
    #[arg(long, env = "AUTH_PASSWORD", default_value = "password", hide_env_values = true)]
    pub auth_password: String,
}

impl ServeArgs {
    /// Bind address with the `--port` override applied.
    pub fn bind_addr(&self) -> SocketAddr {
        let mut addr = self.bind;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.auth_username, &self.auth_password)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

/// Parse a port written either bare (`2565`) or with a leading colon (`:2565`).
fn parse_port(s: &str) -> Result<u16, String> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(':').unwrap_or(trimmed);
    digits
        .parse::<u16>()
        .map_err(|_| format!("invalid port '{}'", s))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .clone()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let bind_addr = args.bind_addr();
    tracing::info!("Starting expensectl server on {}", bind_addr);

    let pool = connect(&database_url, &args.pool_settings())
        .await
        .context("Failed to connect to database")?;

    // No point serving requests if the table can't be created
    init_schema(&pool)
        .await
        .context("Failed to create expenses table")?;

    let config = ServerConfig {
        bind_addr,
        credentials: args.credentials(),
        ..ServerConfig::default()
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgExpenseStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
