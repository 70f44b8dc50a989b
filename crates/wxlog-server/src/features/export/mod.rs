//! Record export in csv, json, md and pdf

pub mod queries;
pub mod routes;

pub use queries::{ExportRecordsError, ExportRecordsQuery, ExportRecordsResponse};
pub use routes::export_routes;
