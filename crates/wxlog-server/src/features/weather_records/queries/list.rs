use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wxlog_common::WeatherRecord;

use crate::db::{weather_records, DbError};

/// Every stored record, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListWeatherRecordsQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListWeatherRecordsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    _query: ListWeatherRecordsQuery,
) -> Result<Vec<WeatherRecord>, ListWeatherRecordsError> {
    let records = weather_records::list_all(&pool).await?;
    tracing::debug!(count = records.len(), "Weather records listed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, weather_records::fixtures::new_record};

    #[tokio::test]
    async fn test_handle_empty() {
        let pool = test_pool().await;
        let records = handle(pool, ListWeatherRecordsQuery).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_handle_returns_all() {
        let pool = test_pool().await;
        weather_records::create(&pool, new_record("Paris", 7.2)).await.unwrap();
        weather_records::create(&pool, new_record("Berlin", 3.5)).await.unwrap();

        let records = handle(pool, ListWeatherRecordsQuery).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].query, "Berlin");
    }
}
