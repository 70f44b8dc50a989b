//! Export all records in a requested format
//!
//! The format token is checked before the database is touched, so an
//! unsupported format never produces partial output.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wxlog_common::{export, ExportFormat, WxlogError};

use crate::db::{weather_records, DbError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRecordsQuery {
    /// `csv`, `json`, `md` or `pdf`; absent or blank means `json`
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExportRecordsResponse {
    pub format: ExportFormat,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportRecordsError {
    #[error("Format not supported: {0}")]
    UnsupportedFormat(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Export failed: {0}")]
    Render(#[from] WxlogError),
}

impl ExportRecordsQuery {
    pub fn validate(&self) -> Result<ExportFormat, ExportRecordsError> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") => Ok(ExportFormat::default()),
            Some(token) => token
                .parse()
                .map_err(|_| ExportRecordsError::UnsupportedFormat(token.to_string())),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ExportRecordsQuery,
) -> Result<ExportRecordsResponse, ExportRecordsError> {
    let format = query.validate()?;

    let records = weather_records::list_all(&pool).await?;
    let body = export::render(format, &records)?;

    tracing::info!(%format, count = records.len(), bytes = body.len(), "Records exported");

    Ok(ExportRecordsResponse { format, body })
}
