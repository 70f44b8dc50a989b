//! Weather record API routes
//!
//! # Route Structure
//!
//! - `POST /weather/?query=..&date_from=..&date_to=..` - Look up and store a record
//! - `GET /weather/` - List all records
//! - `GET /weather/:id` - Get a single record
//! - `PUT /weather/:id?temperature=..&details=..` - Overwrite mutable fields
//! - `DELETE /weather/:id` - Delete a record
//!
//! The collection routes answer with and without the trailing slash.
//! Parameters travel in the query string; bodies are ignored.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::{
    commands::{
        CreateWeatherRecordCommand, CreateWeatherRecordError, DeleteWeatherRecordCommand,
        DeleteWeatherRecordError, UpdateWeatherRecordCommand, UpdateWeatherRecordError,
    },
    queries::{
        GetWeatherRecordError, GetWeatherRecordQuery, ListWeatherRecordsError,
        ListWeatherRecordsQuery,
    },
};
use crate::api::response::{codes, ErrorResponse};
use crate::features::FeatureState;

// ============================================================================
// Router Configuration
// ============================================================================

pub fn weather_records_routes() -> Router<FeatureState> {
    Router::new()
        .route("/weather", post(create_weather_record).get(list_weather_records))
        .route("/weather/", post(create_weather_record).get(list_weather_records))
        .route(
            "/weather/:id",
            get(get_weather_record)
                .put(update_weather_record)
                .delete(delete_weather_record),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a record
///
/// - `201 Created` - Record stored
/// - `400 Bad Request` - Blank query or invalid date range
/// - `404 Not Found` - Location or forecast not found
async fn create_weather_record(
    State(state): State<FeatureState>,
    command: Result<Query<CreateWeatherRecordCommand>, QueryRejection>,
) -> Result<Response, WeatherRecordApiError> {
    let Query(command) = command?;

    let record =
        super::commands::create::handle(state.db, state.provider.as_ref(), command).await?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// Update temperature and/or details
///
/// - `200 OK` - Updated (or unchanged) record
/// - `400 Bad Request` - Non-numeric or non-finite temperature
/// - `404 Not Found` - No such record
async fn update_weather_record(
    State(state): State<FeatureState>,
    id: Result<Path<i64>, PathRejection>,
    command: Result<Query<UpdateWeatherRecordCommand>, QueryRejection>,
) -> Result<Response, WeatherRecordApiError> {
    let Path(id) = id?;
    let Query(mut command) = command?;
    command.id = id;

    let record = super::commands::update::handle(state.db, command).await?;

    tracing::info!(record_id = record.id, "Weather record updated via API");

    Ok((StatusCode::OK, Json(record)).into_response())
}

async fn delete_weather_record(
    State(state): State<FeatureState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, WeatherRecordApiError> {
    let Path(id) = id?;

    let response =
        super::commands::delete::handle(state.db, DeleteWeatherRecordCommand { id }).await?;

    tracing::info!(record_id = response.id, "Weather record deleted via API");

    Ok((StatusCode::OK, Json(response)).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn get_weather_record(
    State(state): State<FeatureState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, WeatherRecordApiError> {
    let Path(id) = id?;

    let record = super::queries::get::handle(state.db, GetWeatherRecordQuery { id }).await?;

    Ok((StatusCode::OK, Json(record)).into_response())
}

async fn list_weather_records(
    State(state): State<FeatureState>,
) -> Result<Response, WeatherRecordApiError> {
    let records = super::queries::list::handle(state.db, ListWeatherRecordsQuery).await?;

    Ok((StatusCode::OK, Json(records)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for weather record endpoints
#[derive(Debug)]
enum WeatherRecordApiError {
    /// Path or query string could not be deserialized
    BadRequest(String),
    Create(CreateWeatherRecordError),
    Update(UpdateWeatherRecordError),
    Delete(DeleteWeatherRecordError),
    Get(GetWeatherRecordError),
    List(ListWeatherRecordsError),
}

impl From<QueryRejection> for WeatherRecordApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for WeatherRecordApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CreateWeatherRecordError> for WeatherRecordApiError {
    fn from(err: CreateWeatherRecordError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateWeatherRecordError> for WeatherRecordApiError {
    fn from(err: UpdateWeatherRecordError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteWeatherRecordError> for WeatherRecordApiError {
    fn from(err: DeleteWeatherRecordError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetWeatherRecordError> for WeatherRecordApiError {
    fn from(err: GetWeatherRecordError) -> Self {
        Self::Get(err)
    }
}

impl From<ListWeatherRecordsError> for WeatherRecordApiError {
    fn from(err: ListWeatherRecordsError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for WeatherRecordApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code) = match self {
            Self::BadRequest(_)
            | Self::Create(CreateWeatherRecordError::QueryRequired)
            | Self::Create(CreateWeatherRecordError::InvalidDateRange)
            | Self::Update(UpdateWeatherRecordError::InvalidTemperature) => {
                (StatusCode::BAD_REQUEST, codes::VALIDATION_ERROR)
            },

            Self::Create(CreateWeatherRecordError::LocationNotFound(_))
            | Self::Create(CreateWeatherRecordError::ForecastNotFound(_))
            | Self::Create(CreateWeatherRecordError::EmptyForecast)
            | Self::Update(UpdateWeatherRecordError::NotFound(_))
            | Self::Delete(DeleteWeatherRecordError::NotFound(_))
            | Self::Get(GetWeatherRecordError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, codes::NOT_FOUND)
            },

            Self::Create(CreateWeatherRecordError::Database(e))
            | Self::Update(UpdateWeatherRecordError::Database(e))
            | Self::Delete(DeleteWeatherRecordError::Database(e))
            | Self::Get(GetWeatherRecordError::Database(e))
            | Self::List(ListWeatherRecordsError::Database(e)) => {
                return ErrorResponse::internal(&e);
            },
        };

        ErrorResponse::new(code, message).with_status(status)
    }
}

impl std::fmt::Display for WeatherRecordApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "{}", msg),
            Self::Create(e) => write!(f, "{}", e),
            Self::Update(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::provider::ProviderError;

    #[test]
    fn test_error_status_mapping() {
        let cases: Vec<(WeatherRecordApiError, StatusCode)> = vec![
            (CreateWeatherRecordError::InvalidDateRange.into(), StatusCode::BAD_REQUEST),
            (CreateWeatherRecordError::QueryRequired.into(), StatusCode::BAD_REQUEST),
            (
                CreateWeatherRecordError::LocationNotFound(ProviderError::NotFound("x".into()))
                    .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                CreateWeatherRecordError::ForecastNotFound(ProviderError::Unavailable(
                    "timeout".into(),
                ))
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (UpdateWeatherRecordError::InvalidTemperature.into(), StatusCode::BAD_REQUEST),
            (DeleteWeatherRecordError::NotFound(1).into(), StatusCode::NOT_FOUND),
            (
                ListWeatherRecordsError::Database(DbError::config("gone")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let label = err.to_string();
            assert_eq!(err.into_response().status(), expected, "{label}");
        }
    }

    #[test]
    fn test_error_display() {
        let err: WeatherRecordApiError = GetWeatherRecordError::NotFound(12).into();
        assert_eq!(err.to_string(), "Weather record 12 not found");
    }
}
