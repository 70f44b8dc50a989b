//! CSV export

use crate::error::{Result, WxlogError};
use crate::types::WeatherRecord;

/// Header row, in record field order
pub const COLUMNS: [&str; 13] = [
    "id",
    "query",
    "location",
    "latitude",
    "longitude",
    "date_from",
    "date_to",
    "date_queried",
    "temperature",
    "details",
    "icon_url",
    "map_url",
    "youtube_url",
];

/// Render records as CSV with a header row
///
/// The header is written explicitly so an empty collection still yields it.
pub fn render(records: &[WeatherRecord]) -> Result<Vec<u8>> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| WxlogError::Io(e.into_error()))
}
