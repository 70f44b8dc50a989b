//! wxlog Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, export renderers, logging and error handling for the wxlog
//! workspace.
//!
//! # Overview
//!
//! - **Types**: the [`WeatherRecord`] DTO and the [`ExportFormat`] token
//! - **Export**: CSV, JSON, Markdown and PDF renderers over record slices
//! - **Logging**: `tracing` subscriber bootstrap driven by environment
//! - **Error Handling**: [`WxlogError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```no_run
//! use wxlog_common::{export, ExportFormat, WeatherRecord};
//!
//! fn to_markdown(records: &[WeatherRecord]) -> wxlog_common::Result<String> {
//!     let bytes = export::render(ExportFormat::Md, records)?;
//!     Ok(String::from_utf8_lossy(&bytes).into_owned())
//! }
//! ```

pub mod error;
pub mod export;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, WxlogError};
pub use types::{ExportFormat, WeatherRecord};
