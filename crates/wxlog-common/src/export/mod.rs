//! Record export renderers
//!
//! Every renderer consumes the same ordered slice of records and emits one
//! entry per record, in input order. The Markdown and PDF renderers show a
//! narrower column set (id, query, location, date queried, temperature); CSV
//! and JSON carry every field.

pub mod csv;
pub mod markdown;
pub mod pdf;

use crate::error::Result;
use crate::types::{ExportFormat, WeatherRecord};

/// Timestamp layout used by the Markdown and PDF renderers
pub(crate) const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `records` in the given format
#[tracing::instrument(skip(records), fields(count = records.len()))]
pub fn render(format: ExportFormat, records: &[WeatherRecord]) -> Result<Vec<u8>> {
    let output = match format {
        ExportFormat::Csv => self::csv::render(records)?,
        ExportFormat::Json => render_json(records)?,
        ExportFormat::Md => markdown::render(records).into_bytes(),
        ExportFormat::Pdf => pdf::render(records),
    };

    tracing::debug!(bytes = output.len(), %format, "Rendered export");
    Ok(output)
}

fn render_json(records: &[WeatherRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Flatten a value onto a single line
pub(crate) fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
