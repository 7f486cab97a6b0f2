//! Best-effort geolocation enrichment
//!
//! The position is looked up once at start-up and merged into the session if
//! available. Failures are logged and swallowed; they never block or fail a
//! recommendation request.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use shared::GeoLocation;
use tokio::task::JoinHandle;

use crate::config::GeolocationConfig;
use crate::error::LocationError;
use crate::external::IpGeolocationClient;
use crate::services::controller::Controller;

/// A platform capability that can report the current position
#[async_trait]
pub trait LocationSource: Send + Sync + fmt::Debug {
    async fn current_position(&self) -> Result<GeoLocation, LocationError>;
}

/// Fixed coordinates from configuration
#[derive(Debug, Clone)]
pub struct StaticLocation(pub GeoLocation);

#[async_trait]
impl LocationSource for StaticLocation {
    async fn current_position(&self) -> Result<GeoLocation, LocationError> {
        Ok(self.0)
    }
}

/// No geolocation capability on this platform
#[derive(Debug, Clone, Default)]
pub struct DisabledLocation;

#[async_trait]
impl LocationSource for DisabledLocation {
    async fn current_position(&self) -> Result<GeoLocation, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Pick the location source described by configuration.
///
/// Misconfiguration degrades to [`DisabledLocation`] with a warning, since
/// location is optional.
pub fn location_source_from_config(config: &GeolocationConfig) -> Arc<dyn LocationSource> {
    match config.mode.as_str() {
        "static" => match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => {
                Arc::new(StaticLocation(GeoLocation::new(latitude, longitude)))
            }
            _ => {
                tracing::warn!("Static geolocation needs latitude and longitude, disabling");
                Arc::new(DisabledLocation)
            }
        },
        "ip" => match IpGeolocationClient::new(
            config.endpoint.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        ) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::warn!(error = %e, "Could not build geolocation client, disabling");
                Arc::new(DisabledLocation)
            }
        },
        "disabled" => Arc::new(DisabledLocation),
        other => {
            tracing::warn!(mode = other, "Unknown geolocation mode, disabling");
            Arc::new(DisabledLocation)
        }
    }
}

/// Look up the position once and store it on success.
///
/// Returns the stored location, or `None` if the lookup was denied, failed, or
/// produced out-of-range coordinates.
pub async fn request_location(
    source: &dyn LocationSource,
    controller: &Controller,
) -> Option<GeoLocation> {
    match source.current_position().await {
        Ok(location) if location.is_valid() => {
            tracing::info!(%location, "Location synchronized");
            controller.set_location(location);
            Some(location)
        }
        Ok(location) => {
            tracing::warn!(?location, "Ignoring out-of-range geolocation fix");
            None
        }
        Err(LocationError::Unavailable) => {
            tracing::debug!("Geolocation unavailable, continuing without location");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Geolocation denied or failed, continuing without location");
            None
        }
    }
}

/// Fire-and-forget variant of [`request_location`] for start-up
pub fn spawn_location_request(
    source: Arc<dyn LocationSource>,
    controller: Controller,
) -> JoinHandle<Option<GeoLocation>> {
    tokio::spawn(async move { request_location(source.as_ref(), &controller).await })
}
