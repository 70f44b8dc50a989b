//! Geocoding and forecast providers
//!
//! The record service talks to the outside world through [`WeatherProvider`]
//! so the HTTP implementation can be swapped for a stub in tests. The only
//! production implementation is [`OpenMeteoClient`].

pub mod open_meteo;
#[cfg(any(test, feature = "test-util"))]
pub mod stub;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use open_meteo::OpenMeteoClient;

/// A free-text location resolved to coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    /// Empty when the geocoder has no country for the place
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    /// `"<name>, <country>"`; the country part is empty when unknown
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Daily series for a date range, one entry per forecast day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub max_temperatures: Vec<f64>,
    pub min_temperatures: Vec<f64>,
    pub weather_codes: Vec<i64>,
}

impl DailyForecast {
    /// Highest daily maximum, `None` for an empty series
    pub fn peak_temperature(&self) -> Option<f64> {
        self.max_temperatures.iter().copied().reduce(f64::max)
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No match for '{0}'")]
    NotFound(String),

    #[error("Weather service unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected response from weather service: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// True when the upstream could not be reached or answered with an error status
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_))
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a free-text query to the best matching place
    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation, ProviderError>;

    /// Daily forecast for `[date_from, date_to]` at the given coordinates
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<DailyForecast, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut location = ResolvedLocation {
            name: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        };
        assert_eq!(location.display_name(), "Paris, France");

        location.country.clear();
        assert_eq!(location.display_name(), "Paris, ");
    }

    #[test]
    fn test_peak_temperature() {
        let forecast = DailyForecast {
            max_temperatures: vec![5.0, 7.2, 6.1],
            ..Default::default()
        };
        assert_eq!(forecast.peak_temperature(), Some(7.2));
        assert_eq!(DailyForecast::default().peak_temperature(), None);

        let freezing = DailyForecast {
            max_temperatures: vec![-4.5, -1.0, -3.2],
            ..Default::default()
        };
        assert_eq!(freezing.peak_temperature(), Some(-1.0));
    }

    #[test]
    fn test_is_unavailable() {
        assert!(ProviderError::Unavailable("timeout".into()).is_unavailable());
        assert!(!ProviderError::NotFound("x".into()).is_unavailable());
    }
}
