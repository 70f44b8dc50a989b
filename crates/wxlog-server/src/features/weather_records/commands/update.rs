use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wxlog_common::WeatherRecord;

use crate::db::{
    weather_records::{self, WeatherRecordPatch},
    DbError,
};

/// Overwrite the mutable fields of a record
///
/// Absent fields keep their stored value; a command with neither field set
/// returns the record unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWeatherRecordCommand {
    #[serde(skip)]
    pub id: i64,
    pub temperature: Option<f64>,
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateWeatherRecordError {
    #[error("Temperature must be a finite number")]
    InvalidTemperature,
    #[error("Weather record {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl UpdateWeatherRecordCommand {
    pub fn validate(&self) -> Result<(), UpdateWeatherRecordError> {
        match self.temperature {
            Some(t) if !t.is_finite() => Err(UpdateWeatherRecordError::InvalidTemperature),
            _ => Ok(()),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateWeatherRecordCommand,
) -> Result<WeatherRecord, UpdateWeatherRecordError> {
    command.validate()?;

    let patch = WeatherRecordPatch {
        temperature: command.temperature,
        details: command.details,
    };
    if patch.is_empty() {
        tracing::debug!("Empty patch, returning stored record");
    }

    match weather_records::update(&pool, command.id, patch).await {
        Ok(record) => Ok(record),
        Err(e) if e.is_not_found() => Err(UpdateWeatherRecordError::NotFound(command.id)),
        Err(e) => Err(e.into()),
    }
}
