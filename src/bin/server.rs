//! Parcelgate API server.

use anyhow::Context;
use clap::Parser;
use parcelgate::api::rest::{AppState, create_router};
use parcelgate::application::services::booking::BookingService;
use parcelgate::application::services::party_resolution::PartyResolver;
use parcelgate::application::services::rate_aggregation::{
    AggregationConfig, RateAggregationEngine,
};
use parcelgate::application::services::shipments::ShipmentService;
use parcelgate::application::services::tracking::{TrackingService, TrackingSweep};
use parcelgate::config::AppConfig;
use parcelgate::infrastructure::persistence::in_memory::{
    InMemoryDeliveryNoteRepository, InMemoryPartyDirectory, InMemoryShipmentRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "parcelgate-server", about = "Parcelgate API server")]
struct Args {
    /// Path to the config file (without extension), optional.
    #[arg(long, default_value = "parcelgate")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config).context("failed to load configuration")?;

    let registry = Arc::new(
        config
            .build_registry()
            .context("failed to build provider registry")?,
    );
    tracing::info!(providers = registry.len(), "provider registry built");

    let shipments = Arc::new(InMemoryShipmentRepository::new());
    let delivery_notes = Arc::new(InMemoryDeliveryNoteRepository::new());
    let directory = Arc::new(InMemoryPartyDirectory::new());
    let resolver = PartyResolver::new(directory);

    let engine = Arc::new(RateAggregationEngine::new(
        registry.clone(),
        AggregationConfig {
            timeout_ms: config.aggregation.timeout_ms,
            per_provider_timeout_ms: config.aggregation.per_provider_timeout_ms,
        },
    ));

    let tracking = Arc::new(TrackingService::new(
        registry.clone(),
        shipments.clone(),
        delivery_notes.clone(),
    ));

    let sweep = TrackingSweep::new(
        tracking.clone(),
        Duration::from_secs(config.tracking.sweep_interval_secs),
    );
    let _sweep_handle = sweep.spawn();
    tracing::info!(
        interval_secs = config.tracking.sweep_interval_secs,
        "tracking sweep scheduled"
    );

    let state = Arc::new(AppState {
        shipments: Arc::new(ShipmentService::new(
            shipments.clone(),
            resolver.clone(),
            engine,
        )),
        booking: Arc::new(BookingService::new(
            registry,
            shipments,
            delivery_notes,
            resolver.clone(),
        )),
        tracking,
        resolver,
    });

    let router = create_router(state);
    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!(address = %bind_address, "listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
