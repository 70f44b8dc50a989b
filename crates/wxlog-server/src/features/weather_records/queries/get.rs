use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wxlog_common::WeatherRecord;

use crate::db::{weather_records, DbError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWeatherRecordQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetWeatherRecordError {
    #[error("Weather record {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: GetWeatherRecordQuery,
) -> Result<WeatherRecord, GetWeatherRecordError> {
    match weather_records::get_by_id(&pool, query.id).await {
        Ok(record) => Ok(record),
        Err(e) if e.is_not_found() => Err(GetWeatherRecordError::NotFound(query.id)),
        Err(e) => Err(e.into()),
    }
}
