//! Smart Crop Advisor - Backend Server
//!
//! Precision agriculture crop recommendations powered by a generative-AI
//! provider.

use std::net::SocketAddr;

use crop_advisor::{
    create_app, external,
    services::{geolocation, Controller, RecommendationClient},
    AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crop_advisor=debug,tower_http=debug".into());
    if config.log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Smart Crop Advisor");
    tracing::info!("Environment: {}", config.environment);

    let provider = external::provider_from_config(&config.provider)?;
    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Recommendation provider ready"
    );

    let controller = Controller::new(RecommendationClient::new(provider));

    // Best-effort location lookup; never blocks start-up
    let location_source = geolocation::location_source_from_config(&config.geolocation);
    geolocation::spawn_location_request(location_source, controller.clone());

    let app = create_app(AppState { controller });

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
