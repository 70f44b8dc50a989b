//! Feature modules implementing the wxlog API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes.
//!
//! # Features
//!
//! - **weather_records**: create records by geocoding + forecast lookup, then read, patch, delete
//! - **export**: download every record as csv, json, md or pdf
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list, export)
//! - `routes.rs` - HTTP route definitions and the feature's API error type
//!
//! Commands and queries are plain data with a `validate()` method; each has a
//! standalone `handle` function that receives its dependencies explicitly.

pub mod export;
pub mod weather_records;

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::provider::WeatherProvider;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// SQLite connection pool for database operations
    pub db: SqlitePool,
    /// Geocoding and forecast lookups
    pub provider: Arc<dyn WeatherProvider>,
}

/// Creates the API router with all feature routes mounted at the root
///
/// - `/weather` - Weather record lifecycle
/// - `/export` - Record export
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(weather_records::weather_records_routes().with_state(state.clone()))
        .merge(export::export_routes().with_state(state.db))
}
