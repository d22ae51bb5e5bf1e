//! HTTP Server configuration and startup.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use profit_types::{ConversationStore, SeenUsersStore};

use super::handlers::{self, AppState};
use super::rate_limit::RateLimiterState;
use crate::BotService;

/// How often idle per-user rate limiters are dropped.
const PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// HTTP Server for the calculator bot.
pub struct HttpServer<C: ConversationStore, S: SeenUsersStore> {
    state: Arc<AppState<C, S>>,
}

impl<C: ConversationStore, S: SeenUsersStore> HttpServer<C, S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: BotService<C, S>) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                rate_limiter: RateLimiterState::default(), // 60 req/min per user
            }),
        }
    }

    /// Creates a new HTTP server with custom per-user rate limiting.
    pub fn with_rate_limit(service: BotService<C, S>, requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                rate_limiter: RateLimiterState::per_minute(requests_per_minute),
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health::<C, S>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/messages", post(handlers::post_message::<C, S>))
            .route("/api/callbacks", post(handlers::post_callback::<C, S>))
            .route(
                "/api/conversations/{user_id}",
                get(handlers::get_conversation::<C, S>)
                    .put(handlers::put_conversation::<C, S>)
                    .delete(handlers::delete_conversation::<C, S>),
            )
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let pruning = self.state.rate_limiter.spawn_pruning(PRUNE_INTERVAL);

        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await;

        pruning.abort();
        served?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
