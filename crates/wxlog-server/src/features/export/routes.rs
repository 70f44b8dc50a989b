//! Export API routes
//!
//! - `GET /export/?format=csv|json|md|pdf` - Download every record (default `json`)

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::SqlitePool;

use super::queries::{ExportRecordsError, ExportRecordsQuery};
use crate::api::response::{codes, ErrorResponse};

pub fn export_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/export", get(export_records))
        .route("/export/", get(export_records))
}

/// Export records as a file download
///
/// - `200 OK` - Payload with `Content-Type` and `Content-Disposition: attachment`
/// - `400 Bad Request` - Unknown format
async fn export_records(
    State(pool): State<SqlitePool>,
    query: Result<Query<ExportRecordsQuery>, QueryRejection>,
) -> Result<Response, ExportApiError> {
    let Query(query) = query?;

    let response = super::queries::export::handle(pool, query).await?;
    let disposition = format!("attachment; filename={}", response.format.default_filename());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, response.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        response.body,
    )
        .into_response())
}

#[derive(Debug)]
enum ExportApiError {
    BadRequest(String),
    Export(ExportRecordsError),
}

impl From<QueryRejection> for ExportApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ExportRecordsError> for ExportApiError {
    fn from(err: ExportRecordsError) -> Self {
        Self::Export(err)
    }
}

impl IntoResponse for ExportApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => ErrorResponse::new(codes::VALIDATION_ERROR, msg)
                .with_status(StatusCode::BAD_REQUEST),
            Self::Export(err @ ExportRecordsError::UnsupportedFormat(_)) => {
                ErrorResponse::new(codes::UNSUPPORTED_FORMAT, err.to_string())
                    .with_status(StatusCode::BAD_REQUEST)
            },
            Self::Export(err) => ErrorResponse::internal(&err),
        }
    }
}
