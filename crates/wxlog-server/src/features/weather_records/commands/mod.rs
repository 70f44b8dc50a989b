pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateWeatherRecordCommand, CreateWeatherRecordError};
pub use delete::{DeleteWeatherRecordCommand, DeleteWeatherRecordError, DeleteWeatherRecordResponse};
pub use update::{UpdateWeatherRecordCommand, UpdateWeatherRecordError};
