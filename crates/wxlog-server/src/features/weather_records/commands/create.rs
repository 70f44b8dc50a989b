//! Create weather record command
//!
//! The only way a record comes into existence:
//!
//! 1. Parse and check the date range
//! 2. Resolve the free-text query to coordinates
//! 3. Fetch the daily forecast for the range
//! 4. Derive the summary temperature and enrichment links
//! 5. Insert the row
//!
//! Nothing is written unless steps 1-3 succeed.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wxlog_common::WeatherRecord;

use crate::db::{
    weather_records::{self, NewWeatherRecord},
    DbError,
};
use crate::features::weather_records::links;
use crate::provider::{ProviderError, WeatherProvider};

/// Command to look up the weather for a place and store the result
///
/// Fields arrive as raw query-string values; missing ones deserialize to
/// empty strings and fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWeatherRecordCommand {
    /// Free-text location, e.g. "Paris"
    #[serde(default)]
    pub query: String,

    /// First day of the range, `YYYY-MM-DD`
    #[serde(default)]
    pub date_from: String,

    /// Last day of the range (inclusive), `YYYY-MM-DD`
    #[serde(default)]
    pub date_to: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateWeatherRecordError {
    #[error("Query is required")]
    QueryRequired,

    #[error("Invalid date range")]
    InvalidDateRange,

    #[error("Location not found")]
    LocationNotFound(#[source] ProviderError),

    #[error("Forecast not found")]
    ForecastNotFound(#[source] ProviderError),

    #[error("Forecast not found")]
    EmptyForecast,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl CreateWeatherRecordCommand {
    /// Validates the command and returns the parsed date range
    ///
    /// # Errors
    ///
    /// - `QueryRequired` if the query is blank
    /// - `InvalidDateRange` if either date is not `YYYY-MM-DD` or
    ///   `date_from` is after `date_to`
    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate), CreateWeatherRecordError> {
        if self.query.trim().is_empty() {
            return Err(CreateWeatherRecordError::QueryRequired);
        }

        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| CreateWeatherRecordError::InvalidDateRange)
        };
        let date_from = parse(&self.date_from)?;
        let date_to = parse(&self.date_to)?;

        if date_from > date_to {
            return Err(CreateWeatherRecordError::InvalidDateRange);
        }

        Ok((date_from, date_to))
    }
}

#[tracing::instrument(
    skip(pool, provider, command),
    fields(query = %command.query, date_from = %command.date_from, date_to = %command.date_to)
)]
pub async fn handle(
    pool: SqlitePool,
    provider: &dyn WeatherProvider,
    command: CreateWeatherRecordCommand,
) -> Result<WeatherRecord, CreateWeatherRecordError> {
    let (date_from, date_to) = command.validate()?;

    let place = provider
        .resolve_location(&command.query)
        .await
        .map_err(|e| {
            tracing::info!(error = %e, unavailable = e.is_unavailable(), "Location lookup failed");
            CreateWeatherRecordError::LocationNotFound(e)
        })?;

    let forecast = provider
        .fetch_forecast(place.latitude, place.longitude, date_from, date_to)
        .await
        .map_err(|e| {
            tracing::info!(error = %e, unavailable = e.is_unavailable(), "Forecast lookup failed");
            CreateWeatherRecordError::ForecastNotFound(e)
        })?;

    let temperature = forecast
        .peak_temperature()
        .ok_or(CreateWeatherRecordError::EmptyForecast)?;

    let record = NewWeatherRecord {
        location: place.display_name(),
        latitude: place.latitude,
        longitude: place.longitude,
        date_from,
        date_to,
        date_queried: Utc::now(),
        temperature,
        details: format!("Max temps: {:?}", forecast.max_temperatures),
        icon_url: String::new(),
        map_url: links::map_url(place.latitude, place.longitude),
        youtube_url: links::youtube_url(&place.name),
        query: command.query,
    };

    let created = weather_records::create(&pool, record).await?;

    tracing::info!(
        record_id = created.id,
        location = %created.location,
        temperature = created.temperature,
        "Weather record created"
    );

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::provider::{stub::StubProvider, DailyForecast};
    use std::sync::atomic::Ordering;

    fn command(query: &str, from: &str, to: &str) -> CreateWeatherRecordCommand {
        CreateWeatherRecordCommand {
            query: query.to_string(),
            date_from: from.to_string(),
            date_to: to.to_string(),
        }
    }

    #[test]
    fn test_validation_success() {
        let (from, to) = command("Paris", "2024-01-01", "2024-01-03").validate().unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());

        // single-day range
        assert!(command("Paris", "2024-01-01", "2024-01-01").validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        for (from, to) in [
            ("2024-01-05", "2024-01-01"),
            ("01/01/2024", "2024-01-03"),
            ("2024-02-30", "2024-03-01"),
            ("", "2024-01-03"),
        ] {
            assert!(
                matches!(
                    command("Paris", from, to).validate(),
                    Err(CreateWeatherRecordError::InvalidDateRange)
                ),
                "{from}..{to} should be rejected"
            );
        }
    }

    #[test]
    fn test_validation_blank_query() {
        assert!(matches!(
            command("   ", "2024-01-01", "2024-01-03").validate(),
            Err(CreateWeatherRecordError::QueryRequired)
        ));
    }

    #[tokio::test]
    async fn test_handle_paris() {
        let pool = test_pool().await;
        let provider = StubProvider::paris();

        let record = handle(pool.clone(), &provider, command("Paris", "2024-01-01", "2024-01-03"))
            .await
            .unwrap();

        assert_eq!(record.temperature, 7.2);
        assert_eq!(record.location, "Paris, France");
        assert_eq!(record.query, "Paris");
        assert_eq!(record.details, "Max temps: [5.0, 7.2, 6.1]");
        assert_eq!(record.icon_url, "");
        assert!(record.map_url.contains("query=48.8566,2.3522"));
        assert!(record.youtube_url.ends_with("search_query=Paris+weather"));

        let stored = weather_records::get_by_id(&pool, record.id).await.unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_handle_unknown_location_writes_nothing() {
        let pool = test_pool().await;
        let provider = StubProvider::paris();

        let result =
            handle(pool.clone(), &provider, command("Zzzzqx123", "2024-01-01", "2024-01-03")).await;

        let err = result.unwrap_err();
        assert!(matches!(err, CreateWeatherRecordError::LocationNotFound(_)));
        assert_eq!(err.to_string(), "Location not found");
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
        assert!(weather_records::list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_invalid_range_skips_provider() {
        let pool = test_pool().await;
        let provider = StubProvider::paris();

        let result = handle(pool.clone(), &provider, command("Paris", "2024-01-05", "2024-01-01")).await;

        assert!(matches!(result, Err(CreateWeatherRecordError::InvalidDateRange)));
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
        assert!(weather_records::list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_forecast_failures() {
        let pool = test_pool().await;

        let mut provider = StubProvider::paris();
        provider.forecasts.clear();
        let result = handle(pool.clone(), &provider, command("Paris", "2024-01-01", "2024-01-03")).await;
        assert!(matches!(result, Err(CreateWeatherRecordError::ForecastNotFound(_))));

        let provider = StubProvider::paris().with_forecast(48.8566, 2.3522, DailyForecast::default());
        let result = handle(pool.clone(), &provider, command("Paris", "2024-01-01", "2024-01-03")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, CreateWeatherRecordError::EmptyForecast));
        assert_eq!(err.to_string(), "Forecast not found");

        assert!(weather_records::list_all(&pool).await.unwrap().is_empty());
    }
}
