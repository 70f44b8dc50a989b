//! In-process provider answering from fixed tables
//!
//! Compiled for unit tests and behind the `test-util` feature for the
//! integration suites.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DailyForecast, ProviderError, ResolvedLocation, WeatherProvider};

/// Locations keyed by query, forecasts keyed by coordinates
#[derive(Debug, Default)]
pub struct StubProvider {
    pub locations: HashMap<String, ResolvedLocation>,
    pub forecasts: HashMap<String, DailyForecast>,
    /// `resolve_location` calls
    pub lookups: AtomicUsize,
    /// `fetch_forecast` calls
    pub forecast_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `query` and a forecast with the given daily maxima
    pub fn with_location(
        mut self,
        query: &str,
        name: &str,
        country: &str,
        latitude: f64,
        longitude: f64,
        max_temperatures: Vec<f64>,
    ) -> Self {
        self.locations.insert(
            query.to_string(),
            ResolvedLocation {
                name: name.to_string(),
                country: country.to_string(),
                latitude,
                longitude,
            },
        );
        self.with_forecast(
            latitude,
            longitude,
            DailyForecast {
                min_temperatures: max_temperatures.iter().map(|t| t - 5.0).collect(),
                weather_codes: vec![3; max_temperatures.len()],
                max_temperatures,
            },
        )
    }

    /// Replace the forecast served for a coordinate pair
    pub fn with_forecast(mut self, latitude: f64, longitude: f64, forecast: DailyForecast) -> Self {
        self.forecasts
            .insert(coordinates_key(latitude, longitude), forecast);
        self
    }

    /// Paris (48.8566, 2.3522) with max temps [5.0, 7.2, 6.1]
    pub fn paris() -> Self {
        Self::new().with_location("Paris", "Paris", "France", 48.8566, 2.3522, vec![5.0, 7.2, 6.1])
    }
}

fn coordinates_key(latitude: f64, longitude: f64) -> String {
    format!("{},{}", latitude, longitude)
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation, ProviderError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.locations
            .get(query)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(query.to_string()))
    }

    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        _date_from: NaiveDate,
        _date_to: NaiveDate,
    ) -> Result<DailyForecast, ProviderError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        let key = coordinates_key(latitude, longitude);
        self.forecasts
            .get(&key)
            .cloned()
            .ok_or(ProviderError::NotFound(key))
    }
}
