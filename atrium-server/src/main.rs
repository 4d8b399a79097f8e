//! # Atrium Server
//!
//! Small user-management HTTP service.
//!
//! - **User routes**: create, list, current-user details, update, delete —
//!   all bearer-token authenticated
//! - **Auth**: register/login issuing short-lived HS256 access tokens
//! - **Storage**: PostgreSQL, with an in-memory fallback for development

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atrium_server::{
    AppState,
    infra::config::Config,
    routes::create_app,
    store::{MemoryUserStore, PostgresUserStore, UserStore},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "atrium-server")]
#[command(about = "User-management HTTP service with bearer-token authentication")]
struct Cli {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server_host = host;
    }
    if let Some(port) = cli.port {
        config.server_port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let users: Arc<dyn UserStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(
            PostgresUserStore::connect(url)
                .await
                .context("failed to connect to database")?,
        ),
        None => {
            warn!("DATABASE_URL not set; using in-memory user store (data is not persisted)");
            Arc::new(MemoryUserStore::new())
        }
    };

    let config = Arc::new(config);
    let state = AppState::new(users, config.clone());
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid bind address")?;

    info!("Starting Atrium server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {err}");
        return;
    }
    info!("shutdown signal received");
}
