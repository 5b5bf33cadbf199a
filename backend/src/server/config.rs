//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use recipe_backend::domain::RecipeLimits;
use recipe_backend::domain::ports::CachePolicy;
use recipe_backend::outbound::persistence::DbPool;
use recipe_backend::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) cache_policy: CachePolicy,
    pub(crate) cache_purge_interval: Duration,
    pub(crate) limits: RecipeLimits,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Validate `settings` and turn them into a server configuration.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found by [`AppSettings::validate`].
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            request_timeout: settings.request_timeout(),
            cache_policy: settings.cache_policy(),
            cache_purge_interval: settings.cache_purge_interval(),
            limits: RecipeLimits::default(),
            db_pool: None,
        })
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server keeps recipes in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
