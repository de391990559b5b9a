use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, Query, Unit, WeatherReport};
use crate::view;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Shown when the API rejects a query without saying why.
const NOT_FOUND_MESSAGE: &str = "City not found.";

/// Why a lookup produced nothing to display. `Display` yields exactly the
/// user-facing string: API rejections verbatim, transport failures
/// collapsed to one fixed message (the cause is logged, never shown).
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("{0}")]
    Api(String),

    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the three OpenWeather endpoints: current weather, air
/// pollution, and the 5-day/3-hour forecast.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different API root. Tests use this to target
    /// a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Current conditions, keyed by city name or coordinates.
    pub async fn current(&self, query: &Query, unit: Unit) -> Result<CurrentResponse, LookupError> {
        let url = format!("{}/weather", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str()), ("units", unit.as_str())]);

        request = match query {
            Query::City(name) => request.query(&[("q", name.as_str())]),
            Query::Coordinates(coords) => {
                request.query(&[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())])
            }
        };

        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Api(rejection_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Air-pollution reading for a position.
    pub async fn air_quality(
        &self,
        coords: Coordinates,
    ) -> Result<AirPollutionResponse, LookupError> {
        let url = format!("{}/air_pollution", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("appid", self.api_key.clone()),
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Api(rejection_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// 5-day/3-hour forecast for a position.
    pub async fn forecast(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<ForecastResponse, LookupError> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("appid", self.api_key.clone()),
                ("units", unit.as_str().to_string()),
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Api(rejection_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Run a full lookup: current conditions first, then air quality and the
/// forecast in one concurrent round keyed by the resolved coordinates.
/// An API rejection of a secondary call degrades to an absent section,
/// logged at `warn`; a transport failure at any stage fails the whole
/// lookup.
pub async fn fetch_report(
    client: &WeatherClient,
    query: &Query,
    unit: Unit,
    now: DateTime<Utc>,
) -> Result<WeatherReport, LookupError> {
    let current = client.current(query, unit).await?;
    let coords = Coordinates {
        lat: current.coord.lat,
        lon: current.coord.lon,
    };

    let (air, forecast) = tokio::join!(
        client.air_quality(coords),
        client.forecast(coords, unit),
    );

    let aqi = match air {
        Ok(reading) => view::aqi_level(&reading),
        Err(err @ LookupError::Network(_)) => return Err(err),
        Err(err) => {
            tracing::warn!("air quality lookup failed: {err}");
            None
        }
    };

    let forecast = match forecast {
        Ok(resp) => view::daily_forecast(&resp),
        Err(err @ LookupError::Network(_)) => return Err(err),
        Err(err) => {
            tracing::warn!("forecast lookup failed: {err}");
            Vec::new()
        }
    };

    Ok(WeatherReport {
        snapshot: view::snapshot(&current, now),
        aqi,
        forecast,
    })
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ApiRejection>(body)
        .ok()
        .and_then(|rejection| rejection.message)
        .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string())
}

#[derive(Debug, Deserialize)]
struct ApiRejection {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub dt: i64,
    /// Location UTC offset, seconds.
    pub timezone: i32,
    pub coord: CoordBlock,
    pub main: MainReadings,
    pub wind: WindReading,
    /// Metres; the API omits it for some stations.
    #[serde(default)]
    pub visibility: u32,
    pub sys: SysBlock,
    pub weather: Vec<WeatherDesc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordBlock {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Deserialize)]
pub struct WindReading {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct SysBlock {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct WeatherDesc {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    /// Server-local reading time, "YYYY-MM-DD HH:MM:SS".
    pub dt_txt: String,
    pub main: MainReadings,
    pub weather: Vec<WeatherDesc>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    pub list: Vec<PollutionItem>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionItem {
    pub main: PollutionIndex,
}

#[derive(Debug, Deserialize)]
pub struct PollutionIndex {
    pub aqi: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_api_text() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        assert_eq!(rejection_message(body), "city not found");
    }

    #[test]
    fn rejection_message_falls_back_when_absent() {
        assert_eq!(rejection_message(r#"{"cod":"404"}"#), NOT_FOUND_MESSAGE);
        assert_eq!(rejection_message("not json"), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn api_error_displays_verbatim() {
        let err = LookupError::Api("city not found".into());
        assert_eq!(err.to_string(), "city not found");
    }
}
