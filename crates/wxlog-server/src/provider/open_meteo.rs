//! Open-Meteo geocoding and forecast client
//!
//! Two public services, no API key:
//!
//! - `GET {geocoding}/v1/search?name=..&count=1`
//! - `GET {forecast}/v1/forecast?latitude=..&longitude=..&start_date=..&end_date=..&daily=..`
//!
//! One attempt per call, bounded by the configured request timeout.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{DailyForecast, ProviderError, ResolvedLocation, WeatherProvider};
use crate::config::WeatherApiConfig;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

/// Null entries are days outside the model's horizon
#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<i64>>,
}

impl From<DailyBlock> for DailyForecast {
    fn from(block: DailyBlock) -> Self {
        Self {
            max_temperatures: block.temperature_2m_max.into_iter().flatten().collect(),
            min_temperatures: block.temperature_2m_min.into_iter().flatten().collect(),
            weather_codes: block.weathercode.into_iter().flatten().collect(),
        }
    }
}

/// HTTP client for the Open-Meteo APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if the HTTP client cannot be initialized.
    pub fn new(config: &WeatherApiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("wxlog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "Weather API request failed");
                ProviderError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "Weather API returned an error status");
            return Err(ProviderError::Unavailable(format!("{} returned {}", url, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation, ProviderError> {
        let url = format!("{}/v1/search", self.geocoding_url);
        let params = [("name", query.to_string()), ("count", "1".to_string())];

        let body: GeocodingResponse = self.get_json(&url, &params).await?;
        let hit = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NotFound(query.to_string()))?;

        debug!(name = %hit.name, lat = hit.latitude, lon = hit.longitude, "Location resolved");

        Ok(ResolvedLocation {
            name: hit.name,
            country: hit.country.unwrap_or_default(),
            latitude: hit.latitude,
            longitude: hit.longitude,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<DailyForecast, ProviderError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("start_date", date_from.format("%Y-%m-%d").to_string()),
            ("end_date", date_to.format("%Y-%m-%d").to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let body: ForecastResponse = self.get_json(&url, &params).await?;
        let daily = body
            .daily
            .ok_or_else(|| ProviderError::NotFound(format!("{},{}", latitude, longitude)))?;

        let forecast = DailyForecast::from(daily);
        debug!(days = forecast.max_temperatures.len(), "Forecast fetched");
        Ok(forecast)
    }
}
