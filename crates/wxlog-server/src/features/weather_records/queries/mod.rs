pub mod get;
pub mod list;

pub use get::{GetWeatherRecordError, GetWeatherRecordQuery};
pub use list::{ListWeatherRecordsError, ListWeatherRecordsQuery};
