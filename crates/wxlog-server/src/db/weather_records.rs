//! Weather record repository
//!
//! Every write is a single statement with `RETURNING`, so a caller either
//! gets back the fully stored row or an error and nothing changed.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use wxlog_common::WeatherRecord;

use super::{DbError, DbResult};

const COLUMNS: &str = "id, query, location, latitude, longitude, date_from, date_to, \
                       date_queried, temperature, details, icon_url, map_url, youtube_url";

#[derive(Debug, sqlx::FromRow)]
struct WeatherRecordRow {
    id: i64,
    query: String,
    location: String,
    latitude: f64,
    longitude: f64,
    date_from: NaiveDate,
    date_to: NaiveDate,
    date_queried: DateTime<Utc>,
    temperature: f64,
    details: String,
    icon_url: String,
    map_url: String,
    youtube_url: String,
}

impl From<WeatherRecordRow> for WeatherRecord {
    fn from(row: WeatherRecordRow) -> Self {
        Self {
            id: row.id,
            query: row.query,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            date_from: row.date_from,
            date_to: row.date_to,
            date_queried: row.date_queried,
            temperature: row.temperature,
            details: row.details,
            icon_url: row.icon_url,
            map_url: row.map_url,
            youtube_url: row.youtube_url,
        }
    }
}

/// A record ready to be stored; the id is assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherRecord {
    pub query: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub date_queried: DateTime<Utc>,
    pub temperature: f64,
    pub details: String,
    pub icon_url: String,
    pub map_url: String,
    pub youtube_url: String,
}

/// Fields that may change after creation; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherRecordPatch {
    pub temperature: Option<f64>,
    pub details: Option<String>,
}

impl WeatherRecordPatch {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.details.is_none()
    }
}

#[tracing::instrument(skip(pool, record), fields(query = %record.query))]
pub async fn create(pool: &SqlitePool, record: NewWeatherRecord) -> DbResult<WeatherRecord> {
    let sql = format!(
        "INSERT INTO weather_records (query, location, latitude, longitude, date_from, date_to, \
                                      date_queried, temperature, details, icon_url, map_url, youtube_url) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {COLUMNS}"
    );

    let row = sqlx::query_as::<_, WeatherRecordRow>(&sql)
        .bind(&record.query)
        .bind(&record.location)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.date_from)
        .bind(record.date_to)
        .bind(record.date_queried)
        .bind(record.temperature)
        .bind(&record.details)
        .bind(&record.icon_url)
        .bind(&record.map_url)
        .bind(&record.youtube_url)
        .fetch_one(pool)
        .await?;

    tracing::debug!(id = row.id, "Weather record inserted");
    Ok(row.into())
}

/// All records in insertion order
pub async fn list_all(pool: &SqlitePool) -> DbResult<Vec<WeatherRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM weather_records ORDER BY id");

    let rows = sqlx::query_as::<_, WeatherRecordRow>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(WeatherRecord::from).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> DbResult<WeatherRecord> {
    let sql = format!("SELECT {COLUMNS} FROM weather_records WHERE id = ?");

    sqlx::query_as::<_, WeatherRecordRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(WeatherRecord::from)
        .ok_or_else(|| DbError::not_found("Weather record", id))
}

/// Overwrite the present fields of `patch` in one statement
#[tracing::instrument(skip(pool))]
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    patch: WeatherRecordPatch,
) -> DbResult<WeatherRecord> {
    let sql = format!(
        "UPDATE weather_records \
         SET temperature = COALESCE(?, temperature), details = COALESCE(?, details) \
         WHERE id = ? \
         RETURNING {COLUMNS}"
    );

    sqlx::query_as::<_, WeatherRecordRow>(&sql)
        .bind(patch.temperature)
        .bind(patch.details)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(WeatherRecord::from)
        .ok_or_else(|| DbError::not_found("Weather record", id))
}

#[tracing::instrument(skip(pool))]
pub async fn delete(pool: &SqlitePool, id: i64) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM weather_records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Weather record", id));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn new_record(query: &str, temperature: f64) -> NewWeatherRecord {
        NewWeatherRecord {
            query: query.to_string(),
            location: format!("{}, Testland", query),
            latitude: 48.8566,
            longitude: 2.3522,
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            date_queried: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
            temperature,
            details: format!("Max temps: [{:?}]", temperature),
            icon_url: String::new(),
            map_url: "https://www.google.com/maps/search/?api=1&query=48.8566,2.3522".to_string(),
            youtube_url: format!("https://www.youtube.com/results?search_query={}+weather", query),
        }
    }
}
