//! Configuration management

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL; the file is created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://wxlog.db";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 1;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// ============================================================================
// Weather API Constants
// ============================================================================

/// Open-Meteo geocoding service.
pub const DEFAULT_GEOCODING_API_URL: &str = "https://geocoding-api.open-meteo.com";

/// Open-Meteo forecast service.
pub const DEFAULT_FORECAST_API_URL: &str = "https://api.open-meteo.com";

/// Default timeout for each outbound weather API call, in seconds.
pub const DEFAULT_WEATHER_API_TIMEOUT_SECS: u64 = 10;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub weather_api: WeatherApiConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Geocoding and forecast endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_API_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_API_URL.to_string(),
            timeout_secs: DEFAULT_WEATHER_API_TIMEOUT_SECS,
        }
    }
}

/// Read `key`, falling back to `default` when unset or unparsable
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env_string("WXLOG_HOST", DEFAULT_SERVER_HOST),
                port: env_or("WXLOG_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "WXLOG_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            database: DatabaseConfig {
                url: env_string("DATABASE_URL", DEFAULT_DATABASE_URL),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_or(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: env_string("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGIN)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
            },
            weather_api: WeatherApiConfig {
                geocoding_url: env_string("GEOCODING_API_URL", DEFAULT_GEOCODING_API_URL),
                forecast_url: env_string("FORECAST_API_URL", DEFAULT_FORECAST_API_URL),
                timeout_secs: env_or("WEATHER_API_TIMEOUT", DEFAULT_WEATHER_API_TIMEOUT_SECS),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        for (name, url) in [
            ("GEOCODING_API_URL", &self.weather_api.geocoding_url),
            ("FORECAST_API_URL", &self.weather_api.forecast_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }

        if self.weather_api.timeout_secs == 0 {
            anyhow::bail!("Weather API timeout must be greater than 0");
        }

        // CORS origins
        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            weather_api: WeatherApiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.weather_api.timeout_secs, 10);
    }

    #[test]
    fn test_rejects_inverted_pool_bounds() {
        let mut config = Config::default();
        config.database.min_connections = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_api_url() {
        let mut config = Config::default();
        config.weather_api.forecast_url = "ftp://api.open-meteo.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("FORECAST_API_URL"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.weather_api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
