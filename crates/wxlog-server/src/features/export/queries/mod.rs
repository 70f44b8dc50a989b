pub mod export;

pub use export::{ExportRecordsError, ExportRecordsQuery, ExportRecordsResponse};
