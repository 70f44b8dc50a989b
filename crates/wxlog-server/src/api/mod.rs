//! HTTP service assembly: router, health endpoint and server lifecycle

pub mod response;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::{info, warn};

use crate::config::{Config, CorsConfig};
use crate::features::{self, FeatureState};
use crate::provider::OpenMeteoClient;
use crate::{db, middleware};
use response::{codes, ErrorResponse};

/// Connect the database, apply migrations and serve until a shutdown signal
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let provider = OpenMeteoClient::new(&config.weather_api)?;
    info!(
        geocoding = %config.weather_api.geocoding_url,
        forecast = %config.weather_api.forecast_url,
        timeout_secs = config.weather_api.timeout_secs,
        "Weather provider configured"
    );

    let state = FeatureState {
        db: pool.clone(),
        provider: Arc::new(provider),
    };
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        result = server.into_future() => result?,
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            info!("Waiting up to {} seconds for connections to close", grace.as_secs());
            tokio::time::sleep(grace).await;
        } => {
            warn!("Shutdown timeout elapsed, dropping remaining connections");
        },
    }

    pool.close().await;
    info!("Server shut down");

    Ok(())
}

/// Build the application router with all routes and middleware
pub fn create_router(state: FeatureState, cors: &CorsConfig) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health))
        .with_state(state.db.clone());

    Router::new()
        .merge(health_routes)
        .merge(features::router(state))
        .fallback(not_found)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

/// Liveness plus database connectivity
async fn health(State(pool): State<SqlitePool>) -> Response {
    match db::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected"
                })),
            )
                .into_response()
        },
    }
}

async fn not_found(uri: Uri) -> Response {
    ErrorResponse::new(codes::NOT_FOUND, format!("No route for {}", uri.path()))
        .with_status(StatusCode::NOT_FOUND)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
