//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `RECIPES_*` environment variables and
//! configuration files. Every field is optional; accessors fall back to the
//! defaults below and [`AppSettings::validate`] rejects unusable values
//! before the server starts.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::CachePolicy;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CACHE_EXPIRATION_SECS: u64 = 600;
const DEFAULT_CACHE_SLIDING_SECS: u64 = 300;
const DEFAULT_CACHE_PURGE_INTERVAL_SECS: u64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised when settings cannot be turned into a runnable server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// A duration setting that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    /// The sliding window outlives the absolute expiry.
    #[error("cache_sliding_secs ({sliding}) must not exceed cache_expiration_secs ({absolute})")]
    SlidingExceedsAbsolute { sliding: u64, absolute: u64 },
    /// The database pool would hold no connections.
    #[error("db_max_connections must be at least 1")]
    EmptyPool,
}

/// Runtime configuration for the recipe service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one recipes live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Absolute cache lifetime in seconds.
    pub cache_expiration_secs: Option<u64>,
    /// Sliding cache window in seconds; zero disables sliding expiry.
    pub cache_sliding_secs: Option<u64>,
    /// Seconds between sweeps of expired cache entries.
    pub cache_purge_interval_secs: Option<u64>,
    /// Deadline attached to every dispatched request, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Configured bind address, parsed.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let max_size = self
            .db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        self.database_url()
            .map(|url| PoolConfig::new(url).with_max_size(max_size))
    }

    /// Cache policy applied to every cached recipe read.
    pub fn cache_policy(&self) -> CachePolicy {
        let absolute = self
            .cache_expiration_secs
            .unwrap_or(DEFAULT_CACHE_EXPIRATION_SECS);
        let sliding = self
            .cache_sliding_secs
            .unwrap_or(DEFAULT_CACHE_SLIDING_SECS);
        CachePolicy::new(
            Duration::from_secs(absolute),
            (sliding > 0).then(|| Duration::from_secs(sliding)),
        )
    }

    /// Interval between cache purge sweeps.
    pub fn cache_purge_interval(&self) -> Duration {
        Duration::from_secs(
            self.cache_purge_interval_secs
                .unwrap_or(DEFAULT_CACHE_PURGE_INTERVAL_SECS),
        )
    }

    /// Deadline applied to each request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Reject settings the server cannot run with.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.bind_addr()?;
        if self.db_max_connections == Some(0) {
            return Err(SettingsError::EmptyPool);
        }
        for (name, value) in [
            ("cache_expiration_secs", self.cache_expiration_secs),
            ("cache_purge_interval_secs", self.cache_purge_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if value == Some(0) {
                return Err(SettingsError::ZeroDuration { name });
            }
        }
        let policy = self.cache_policy();
        if let Some(sliding) = policy.sliding() {
            if sliding > policy.absolute() {
                return Err(SettingsError::SlidingExceedsAbsolute {
                    sliding: sliding.as_secs(),
                    absolute: policy.absolute().as_secs(),
                });
            }
        }
        Ok(())
    }
}
