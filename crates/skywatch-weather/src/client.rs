//! Open-Meteo forecast client.
//!
//! One GET per fetch, no retries. A failed fetch is reported to the
//! caller as a typed error and never partially applied.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{Coordinate, FetchError, ForecastTriple};

const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";
const HOURLY_VARIABLES: &str = "temperature_2m,relative_humidity_2m,rain";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Seam between the dashboard and the network.
#[async_trait]
pub trait FetchForecast {
    /// Fetch one day of hourly series for the coordinate.
    async fn fetch_hourly(&self, coordinate: Coordinate) -> Result<ForecastTriple, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(OPEN_METEO_BASE, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Client against a custom base URL, used for configuration
    /// overrides and tests.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly={}&timezone=GMT&forecast_days=1",
            self.base_url, coordinate.latitude, coordinate.longitude, HOURLY_VARIABLES
        )
    }
}

#[async_trait]
impl FetchForecast for ForecastClient {
    #[instrument(skip(self), level = "info")]
    async fn fetch_hourly(&self, coordinate: Coordinate) -> Result<ForecastTriple, FetchError> {
        let response = self
            .client
            .get(self.forecast_url(coordinate))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        body.into_triple()
    }
}

/// Relevant subset of the Open-Meteo forecast response.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(rename = "temperature_2m")]
    temperature: Option<Vec<f64>>,
    #[serde(rename = "relative_humidity_2m")]
    humidity: Option<Vec<f64>>,
    rain: Option<Vec<f64>>,
}

impl ForecastResponse {
    /// Values are passed through unmodified, whatever their length, but
    /// the three series must agree so chart indices stay hour-aligned.
    fn into_triple(self) -> Result<ForecastTriple, FetchError> {
        let hourly = self
            .hourly
            .ok_or_else(|| FetchError::MalformedResponse("missing hourly block".into()))?;

        let temperature = hourly.temperature.ok_or_else(|| missing("temperature_2m"))?;
        let humidity = hourly
            .humidity
            .ok_or_else(|| missing("relative_humidity_2m"))?;
        let rain = hourly.rain.ok_or_else(|| missing("rain"))?;

        if temperature.len() != humidity.len() || temperature.len() != rain.len() {
            return Err(FetchError::MalformedResponse(format!(
                "hourly series lengths disagree: {}/{}/{}",
                temperature.len(),
                humidity.len(),
                rain.len()
            )));
        }

        Ok(ForecastTriple {
            temperature,
            humidity,
            rain,
        })
    }
}

fn missing(field: &str) -> FetchError {
    FetchError::MalformedResponse(format!("missing hourly field: {field}"))
}
