//! # Profit Calculator Server
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the conversation and greeting stores
//! - Create the bot service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profit_hex::{BotService, inbound::HttpServer};
use profit_repo::{InMemoryConversationStore, JsonSeenUsersStore};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("profit-calculator"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,profit_app=debug,profit_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting profit calculator on port {}", config.port);

    // Build stores
    let conversations = InMemoryConversationStore::new();
    let seen_users = JsonSeenUsersStore::open(&config.seen_users_path).await;
    tracing::info!(
        "Greeting store: {} ({} users)",
        config.seen_users_path.display(),
        seen_users.len().await
    );

    // Create the bot service
    let service = BotService::new(conversations, seen_users);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    let served = server.run(&addr).await;

    // Flush pending spans before exit, even if the server failed
    if let Err(e) = otel_provider.shutdown() {
        tracing::warn!(error = %e, "Failed to flush traces");
    }
    served
}
