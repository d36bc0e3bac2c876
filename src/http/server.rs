//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the user lookup from configuration
//! - Bind server to listener and stop on shutdown

use axum::{body::Body, http::Request, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{make_span, MakeRequestUuidV4};
use crate::lifecycle::Shutdown;
use crate::posts::PostListing;
use crate::users::{HttpUserDirectory, UserDirectory, UserNameLookup};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The upstream HTTP client could not be built.
    #[error("Failed to build user service client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub listing: PostListing,
}

/// HTTP server for the post service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a server that looks users up over HTTP.
    pub fn new(config: ServiceConfig, shutdown: Shutdown) -> Result<Self, ServerError> {
        let directory = HttpUserDirectory::new(&config.user_service)?;
        tracing::info!(
            base_url = %directory.base_url(),
            policy = %config.lookup.policy,
            "User service client ready"
        );
        Ok(Self::with_directory(config, Arc::new(directory), shutdown))
    }

    /// Create a server backed by an arbitrary user directory.
    pub fn with_directory(
        config: ServiceConfig,
        directory: Arc<dyn UserDirectory>,
        shutdown: Shutdown,
    ) -> Self {
        let lookup = UserNameLookup::new(directory, &config.lookup, shutdown.clone());
        let state = AppState {
            listing: PostListing::new(lookup),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            shutdown,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The inbound timeout is only installed when configured; validation
    /// guarantees it outlasts the worst-case listing.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/posts", get(handlers::list_posts))
            .route("/health", get(handlers::health))
            .with_state(state);

        let router = match config.timeouts.request_secs {
            Some(secs) => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
            None => router,
        };

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| make_span(request))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// The router, for serving it elsewhere or driving it in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until shutdown is triggered.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::FailurePolicy;
    use crate::users::{LookupError, LookupResult, UserId, UserRecord};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    struct Unreachable;

    #[async_trait]
    impl UserDirectory for Unreachable {
        async fn fetch_user(&self, _id: UserId) -> LookupResult<UserRecord> {
            Err(LookupError::Transport("connection refused".into()))
        }
    }

    fn server(policy: FailurePolicy) -> HttpServer {
        let mut config = ServiceConfig::default();
        config.lookup.policy = policy;
        config.lookup.delay_ms = 0;
        HttpServer::with_directory(config, Arc::new(Unreachable), Shutdown::new())
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_posts_with_fallback_names() {
        let response = get(server(FailurePolicy::Fallback).router(), "/posts").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let posts: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            posts,
            serde_json::json!([
                { "id": 1, "title": "Hello World", "authorName": "Unknown User" },
                { "id": 2, "title": "Second Post", "authorName": "Unknown User" },
            ])
        );
    }

    #[tokio::test]
    async fn test_propagate_fails_listing() {
        let response = get(server(FailurePolicy::Propagate).router(), "/posts").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let response = server(FailurePolicy::Fallback)
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get(server(FailurePolicy::Fallback).router(), "/users/1").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    struct Hung;

    #[async_trait]
    impl UserDirectory for Hung {
        async fn fetch_user(&self, _id: UserId) -> LookupResult<UserRecord> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_inbound_timeout_by_default() {
        let config = ServiceConfig::default();
        assert!(config.timeouts.request_secs.is_none());
        let router = HttpServer::with_directory(config, Arc::new(Hung), Shutdown::new()).router();

        let pending = tokio::spawn(get(router, "/posts"));
        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(!pending.is_finished(), "listing was cut off by an inbound timeout");
        pending.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_inbound_timeout_applies() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = Some(1);
        let router = HttpServer::with_directory(config, Arc::new(Hung), Shutdown::new()).router();

        let response = get(router, "/posts").await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_new_builds_http_client() {
        assert!(HttpServer::new(ServiceConfig::default(), Shutdown::new()).is_ok());
    }
}
