//! Configuration management

use ofn_ingest::store::{StoreConfig, DEFAULT_RETENTION_SECS, DEFAULT_SWEEP_INTERVAL_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding (all interfaces).
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dedupe: DedupeConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Offer retention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupeConfig {
    /// How long an accepted offer suppresses re-ingestion
    pub retention_secs: u64,
    /// Interval between expiry sweeps
    pub sweep_interval_secs: u64,
}

impl DedupeConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            retention: Duration::from_secs(self.retention_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("OFN_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("OFN_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "OFN_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            dedupe: DedupeConfig {
                retention_secs: env_or("OFN_DEDUPE_RETENTION_SECS", DEFAULT_RETENTION_SECS),
                sweep_interval_secs: env_or("OFN_DEDUPE_SWEEP_SECS", DEFAULT_SWEEP_INTERVAL_SECS),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", false),
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

        if self.dedupe.retention_secs == 0 {
            anyhow::bail!("Dedupe retention must be greater than 0 seconds");
        }

        if self.dedupe.sweep_interval_secs == 0 {
            anyhow::bail!("Dedupe sweep interval must be greater than 0 seconds");
        }

        if self.dedupe.sweep_interval_secs > self.dedupe.retention_secs {
            tracing::warn!(
                "Sweep interval ({}s) exceeds retention ({}s); offers may live up to twice as long",
                self.dedupe.sweep_interval_secs,
                self.dedupe.retention_secs
            );
        }

        let wildcard =
            self.cors.allowed_origins.is_empty() || self.cors.allowed_origins.iter().any(|o| o == "*");
        if wildcard && self.cors.allow_credentials {
            anyhow::bail!("CORS credentials cannot be allowed for a wildcard origin");
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
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
            dedupe: DedupeConfig {
                retention_secs: DEFAULT_RETENTION_SECS,
                sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
        }
    }
}
