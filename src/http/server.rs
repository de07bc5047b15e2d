//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the users and links handlers from injected RPC clients
//! - Wire up middleware (tracing, request timeout, request ID, metrics)
//! - Install the body limit used by the strict JSON extractor
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Extension, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{LinksHandler, UsersHandler};
use crate::backend::{LinkService, UserService};
use crate::config::GatewayConfig;
use crate::http::decode::BodyLimit;
use crate::http::request::request_id_layer;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::rpc::{LinksClient, UsersClient};

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server forwarding to the given RPC clients.
    pub fn new(
        config: GatewayConfig,
        users: Arc<dyn UsersClient>,
        links: Arc<dyn LinksClient>,
    ) -> Self {
        let router = Self::build_router(&config, users, links);
        Self { router, config }
    }

    /// Create a server backed by fresh in-process services.
    pub fn in_process(config: GatewayConfig) -> Self {
        Self::new(
            config,
            Arc::new(UserService::new()),
            Arc::new(LinkService::new()),
        )
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &GatewayConfig,
        users: Arc<dyn UsersClient>,
        links: Arc<dyn LinksClient>,
    ) -> Router {
        let deadline = config.timeouts.rpc_deadline();

        Router::new()
            .merge(UsersHandler::new(users, deadline).routes())
            .merge(LinksHandler::new(links, deadline).routes())
            .layer(Extension(BodyLimit(config.limits.max_body_bytes)))
            .layer(middleware::from_fn(track_requests))
            .layer(TimeoutLayer::new(config.timeouts.request()))
            .layer(request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rpc_deadline_ms = self.config.timeouts.rpc_deadline_ms,
            max_body_bytes = self.config.limits.max_body_bytes,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The assembled router, for embedding.
    pub fn into_router(self) -> Router {
        self.router
    }
}

async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}
