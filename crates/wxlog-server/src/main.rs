//! wxlog Server - Main entry point

use anyhow::Result;
use tracing::info;
use wxlog_common::logging::{init_logging, LogConfig};

use wxlog_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults for the server; environment variables take precedence
    let log_config = LogConfig::builder()
        .log_file_prefix("wxlog-server")
        .filter_directives("wxlog_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting wxlog server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
