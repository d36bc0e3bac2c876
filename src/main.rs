//! Post service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────┐
//!     GET /posts ──────────▶│ http::server ─▶ posts::PostListing           │
//!                           │                    │ (once per post)         │
//!                           │                    ▼                         │
//!                           │              users::UserNameLookup           │
//!                           │        failure policy + resilience::retries  │
//!                           │                    │                         │
//!                           │                    ▼                         │
//!                           │              users::client ──────────────────┼──▶ GET {base_url}/users/{id}
//!                           │                                              │      (user service)
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use post_service::config::{self, ConfigError, ServiceConfig};
use post_service::lifecycle::{signals, Shutdown};
use post_service::observability::{logging, metrics};
use post_service::{FailurePolicy, HttpServer};

#[derive(Parser)]
#[command(name = "post-service")]
#[command(about = "Post listing service enriched with author names from the user service", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `user_service.base_url`.
    #[arg(long, env = "USERSERVICE_BASE_URL")]
    user_service_url: Option<String>,

    /// Override `lookup.policy` (return_none, fallback, propagate, retry).
    #[arg(long)]
    policy: Option<FailurePolicy>,
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(url) = &cli.user_service_url {
        config.user_service.base_url = url.clone();
    }
    if let Some(policy) = cli.policy {
        config.lookup.policy = policy;
    }

    config::validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability.log_level);

    tracing::info!("post-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        user_service = %config.user_service.base_url,
        policy = %config.lookup.policy,
        max_attempts = config.lookup.max_attempts,
        delay_ms = config.lookup.delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, shutdown)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
