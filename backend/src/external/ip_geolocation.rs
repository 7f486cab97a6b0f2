//! IP geolocation client
//!
//! Approximates the device position from its public IP using an
//! ip-api.com-compatible JSON endpoint. Used where no GPS capability exists.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::GeoLocation;

use crate::error::LocationError;
use crate::services::geolocation::LocationSource;

/// Client for an IP geolocation service
#[derive(Debug, Clone)]
pub struct IpGeolocationClient {
    endpoint: String,
    http_client: Client,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocationClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, LocationError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::LookupFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }
}

#[async_trait]
impl LocationSource for IpGeolocationClient {
    async fn current_position(&self) -> Result<GeoLocation, LocationError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| LocationError::LookupFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LocationError::LookupFailed(format!(
                "Geolocation API returned {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocationError::LookupFailed(format!("Failed to parse response: {}", e)))?;

        if data.status != "success" {
            return Err(LocationError::Denied(
                data.message.unwrap_or_else(|| data.status.clone()),
            ));
        }

        match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => Ok(GeoLocation::new(lat, lon)),
            _ => Err(LocationError::LookupFailed(
                "Response is missing coordinates".to_string(),
            )),
        }
    }
}
