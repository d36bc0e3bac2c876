//! Demo user service: an in-memory directory to run the post service against.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use post_service::lifecycle::{signals, Shutdown};
use post_service::observability::logging;
use post_service::users::{UserId, UserRecord};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "In-memory user service for local demos", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "0.0.0.0:8081")]
    bind: String,

    /// Answer every lookup with 503, to exercise the post service's failure policy.
    #[arg(long)]
    unavailable: bool,
}

#[derive(Clone)]
struct Directory {
    users: Arc<HashMap<UserId, String>>,
    unavailable: bool,
}

async fn get_user(State(dir): State<Directory>, Path(id): Path<UserId>) -> Response {
    if dir.unavailable {
        return (StatusCode::SERVICE_UNAVAILABLE, "User service unavailable").into_response();
    }
    match dir.users.get(&id) {
        Some(name) => Json(UserRecord { id, name: name.clone() }).into_response(),
        None => (StatusCode::NOT_FOUND, "User not found").into_response(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("info");

    let users = HashMap::from([
        (1, "Alice".to_string()),
        (2, "Bob".to_string()),
        (7, "Alice".to_string()),
    ]);
    let state = Directory {
        users: Arc::new(users),
        unavailable: cli.unavailable,
    };

    let app = Router::new()
        .route("/users/{id}", get(get_user))
        .with_state(state)
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)));

    let listener = TcpListener::bind(&cli.bind).await?;
    tracing::info!(address = %listener.local_addr()?, unavailable = cli.unavailable, "User service listening");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await?;
    Ok(())
}
