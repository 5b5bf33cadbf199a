//! Port for the recipe read cache.
//!
//! Values are stored as JSON so one cache can hold both single recipes and
//! the full list. Callers treat every error as a miss: the cache is
//! best-effort and never decides whether a request succeeds.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{RecipeCacheKey, define_port_error};

define_port_error! {
    /// Errors raised by recipe cache adapters.
    pub enum RecipeCacheError {
        /// The cache backend failed to serve the call.
        Backend { message: String } => "recipe cache backend failed: {message}",
        /// A value could not be encoded or decoded.
        Serialization { message: String } => "recipe cache serialization failed: {message}",
    }
}

/// Expiry rules for a cache entry.
///
/// An entry expires `absolute` after it was written. With a sliding window
/// it also expires once it has not been read for `sliding`; each read
/// restarts that window but never extends past the absolute expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    absolute: Duration,
    sliding: Option<Duration>,
}

impl CachePolicy {
    /// Policy with an absolute lifetime and optional sliding window.
    #[must_use]
    pub const fn new(absolute: Duration, sliding: Option<Duration>) -> Self {
        Self { absolute, sliding }
    }

    /// Absolute lifetime.
    #[must_use]
    pub const fn absolute(&self) -> Duration {
        self.absolute
    }

    /// Sliding window, if any.
    #[must_use]
    pub const fn sliding(&self) -> Option<Duration> {
        self.sliding
    }
}

impl Default for CachePolicy {
    /// Ten minutes absolute, five minutes sliding.
    fn default() -> Self {
        Self::new(Duration::from_secs(600), Some(Duration::from_secs(300)))
    }
}

/// Port for caching recipe reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCache: Send + Sync {
    /// Cached value for `key`, or `None` on a miss.
    async fn get(&self, key: &RecipeCacheKey) -> Result<Option<Value>, RecipeCacheError>;

    /// Store `value` under `key`, replacing any previous entry.
    async fn set(
        &self,
        key: &RecipeCacheKey,
        value: Value,
        policy: CachePolicy,
    ) -> Result<(), RecipeCacheError>;

    /// Drop the entry for `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &RecipeCacheKey) -> Result<(), RecipeCacheError>;
}
