//! Common types shared by the wxlog crates

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WxlogError;

/// A persisted weather lookup
///
/// Only `temperature` and `details` change after creation; everything else
/// is fixed when the record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub id: i64,
    /// Free-text location exactly as the client submitted it
    pub query: String,
    /// Resolved display name, `"<name>, <country>"`
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub date_queried: DateTime<Utc>,
    /// Maximum of the daily max-temperature series in range
    pub temperature: f64,
    pub details: String,
    /// Reserved, always empty
    pub icon_url: String,
    pub map_url: String,
    pub youtube_url: String,
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with the full field set
    Csv,
    /// Array of record objects
    #[default]
    Json,
    /// Five-column Markdown table
    Md,
    /// Paginated PDF document
    Pdf,
}

impl ExportFormat {
    /// All formats, in the order they are advertised
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Md,
        ExportFormat::Pdf,
    ];

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Md => "md",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type sent with the rendered payload
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Md => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Get default download filename for this format
    pub fn default_filename(&self) -> String {
        format!("weather-records.{}", self.extension())
    }

    /// Get format name as string
    pub fn as_str(&self) -> &'static str {
        self.extension()
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = WxlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "md" => Ok(ExportFormat::Md),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(WxlogError::UnsupportedFormat(s.to_string())),
        }
    }
}
