//! wxlog Server Library
//!
//! HTTP service that records weather lookups and exports them.
//!
//! # Overview
//!
//! - **API Endpoints**: create, list, get, update and delete weather records; export them
//! - **Database Management**: SQLite through SQLx, migrations embedded at build time
//! - **Weather Provider**: Open-Meteo geocoding and forecast client behind a trait
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request tracing and compression
//!
//! # Architecture
//!
//! Features are vertical slices split into **commands** (create, update,
//! delete) and **queries** (get, list, export). Each command or query is a
//! plain struct with a `validate()` method and a standalone `handle`
//! function that receives the pool and, for record creation, the
//! [`provider::WeatherProvider`] explicitly. Routes translate the per-handler
//! error enums into HTTP responses.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: SQLite access and migrations
//! - **Reqwest**: outbound calls to Open-Meteo
//! - **Tower**: middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use wxlog_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
pub mod provider;

// Re-export commonly used types
pub use db::{DbError, DbResult};
pub use features::FeatureState;
pub use provider::{ProviderError, WeatherProvider};
