//! Weather record lifecycle: create via lookup, read, patch, delete

pub mod commands;
pub mod links;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateWeatherRecordCommand, CreateWeatherRecordError, DeleteWeatherRecordCommand,
    DeleteWeatherRecordError, DeleteWeatherRecordResponse, UpdateWeatherRecordCommand,
    UpdateWeatherRecordError,
};

pub use queries::{
    GetWeatherRecordError, GetWeatherRecordQuery, ListWeatherRecordsError,
    ListWeatherRecordsQuery,
};

pub use routes::weather_records_routes;
