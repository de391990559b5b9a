use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::model::Coordinates;

const IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Why a device-position request produced no coordinates. `Display` is the
/// user-facing message; none of these clear weather already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("Location permission denied.")]
    PermissionDenied,

    #[error("Geolocation not supported on this system.")]
    Unsupported,

    #[error("Location service unavailable.")]
    Unavailable,
}

/// Single-shot position request.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeoError>;
}

/// Resolves the device position from its public IP address (ipapi.co).
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    url: String,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_url(IP_LOOKUP_URL.to_string())
    }

    /// Lookup against a different endpoint. Tests point this at a mock
    /// server.
    pub fn with_url(url: String) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl LocationProvider for IpLocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let res = self.http.get(&self.url).send().await.map_err(|err| {
            tracing::warn!("ip geolocation request failed: {err}");
            GeoError::Unavailable
        })?;

        let status = res.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(GeoError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::warn!(%status, "ip geolocation rejected");
            return Err(GeoError::Unavailable);
        }

        let parsed: IpLookupResponse = res.json().await.map_err(|err| {
            tracing::warn!("ip geolocation response unreadable: {err}");
            GeoError::Unavailable
        })?;

        Ok(Coordinates {
            lat: parsed.latitude,
            lon: parsed.longitude,
        })
    }
}
