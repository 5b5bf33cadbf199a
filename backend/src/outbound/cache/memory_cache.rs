//! In-process recipe cache with absolute and sliding expiry.
//!
//! Entries live in a `DashMap`, so concurrent readers and writers of
//! different keys never contend on one lock. Time comes from a
//! [`mockable::Clock`] so expiry can be tested without sleeping. Expired
//! entries are dropped when read and by [`InMemoryRecipeCache::purge_expired`],
//! which [`run_purge_loop`] calls periodically.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::ports::{CachePolicy, RecipeCache, RecipeCacheError, RecipeCacheKey};

fn add(instant: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: DateTime<Utc>,
    sliding: Option<Duration>,
    last_access: DateTime<Utc>,
}

impl Entry {
    fn new(value: Value, policy: CachePolicy, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: add(now, policy.absolute()),
            sliding: policy.sliding(),
            last_access: now,
        }
    }

    fn deadline(&self) -> DateTime<Utc> {
        match self.sliding {
            Some(window) => add(self.last_access, window).min(self.expires_at),
            None => self.expires_at,
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.deadline()
    }
}

/// `DashMap`-backed implementation of the [`RecipeCache`] port.
///
/// # Examples
/// ```
/// use recipe_backend::domain::ports::{CachePolicy, RecipeCache, RecipeCacheKey};
/// use recipe_backend::outbound::cache::InMemoryRecipeCache;
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache = InMemoryRecipeCache::new();
/// let key = RecipeCacheKey::all();
/// cache.set(&key, json!([]), CachePolicy::default()).await.expect("stored");
/// assert_eq!(cache.get(&key).await.expect("read"), Some(json!([])));
/// # });
/// ```
pub struct InMemoryRecipeCache {
    entries: DashMap<String, Entry>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl InMemoryRecipeCache {
    /// Empty cache reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Empty cache reading `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.utc();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }
}

impl Default for InMemoryRecipeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryRecipeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecipeCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RecipeCache for InMemoryRecipeCache {
    async fn get(&self, key: &RecipeCacheKey) -> Result<Option<Value>, RecipeCacheError> {
        let now = self.clock.utc();
        if let Some(mut entry) = self.entries.get_mut(key.as_str()) {
            if entry.is_live(now) {
                entry.last_access = now;
                return Ok(Some(entry.value.clone()));
            }
        }
        if self
            .entries
            .remove_if(key.as_str(), |_, entry| !entry.is_live(now))
            .is_some()
        {
            debug!(key = %key, "evicted expired cache entry");
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &RecipeCacheKey,
        value: Value,
        policy: CachePolicy,
    ) -> Result<(), RecipeCacheError> {
        let entry = Entry::new(value, policy, self.clock.utc());
        self.entries.insert(key.as_str().to_owned(), entry);
        Ok(())
    }

    async fn remove(&self, key: &RecipeCacheKey) -> Result<(), RecipeCacheError> {
        self.entries.remove(key.as_str());
        Ok(())
    }
}

/// Purge expired entries every `interval` until `shutdown` fires.
pub async fn run_purge_loop(
    cache: Arc<InMemoryRecipeCache>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let removed = cache.purge_expired();
                if removed > 0 {
                    debug!(removed, "purged expired recipe cache entries");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Expiry behaviour driven by a manual clock.
    use std::sync::Mutex;

    use chrono::Local;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        fn advance(&self, delta: Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now = add(*now, delta);
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(Utc::now()))
    }

    fn cache_with(clock: &Arc<MutableClock>) -> InMemoryRecipeCache {
        InMemoryRecipeCache::with_clock(Arc::clone(clock) as Arc<dyn Clock + Send + Sync>)
    }

    const MINUTE: Duration = Duration::from_secs(60);

    fn policy(absolute_minutes: u64, sliding_minutes: Option<u64>) -> CachePolicy {
        CachePolicy::new(
            MINUTE * u32::try_from(absolute_minutes).expect("small"),
            sliding_minutes.map(|m| MINUTE * u32::try_from(m).expect("small")),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn missing_key_is_a_miss(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        assert_eq!(cache.get(&RecipeCacheKey::all()).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn absolute_expiry_applies_without_reads(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        let key = RecipeCacheKey::all();
        cache.set(&key, json!([1]), policy(10, None)).await.expect("stored");

        clock.advance(MINUTE * 9);
        assert_eq!(cache.get(&key).await, Ok(Some(json!([1]))));

        clock.advance(MINUTE * 2);
        assert_eq!(cache.get(&key).await, Ok(None));
        assert!(cache.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn idle_entry_expires_after_sliding_window(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        let key = RecipeCacheKey::all();
        cache.set(&key, json!("v"), policy(10, Some(5))).await.expect("stored");

        clock.advance(MINUTE * 6);
        assert_eq!(cache.get(&key).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn reads_extend_sliding_window_up_to_absolute_limit(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        let key = RecipeCacheKey::all();
        cache.set(&key, json!("v"), policy(10, Some(5))).await.expect("stored");

        for _ in 0..2 {
            clock.advance(MINUTE * 4);
            assert_eq!(cache.get(&key).await, Ok(Some(json!("v"))));
        }

        // Eleven minutes after the write: within the sliding window, past the
        // absolute limit.
        clock.advance(MINUTE * 3);
        assert_eq!(cache.get(&key).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn set_replaces_and_remove_drops(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        let key = RecipeCacheKey::all();
        cache.set(&key, json!(1), CachePolicy::default()).await.expect("stored");
        cache.set(&key, json!(2), CachePolicy::default()).await.expect("stored");
        assert_eq!(cache.get(&key).await, Ok(Some(json!(2))));

        cache.remove(&key).await.expect("removed");
        cache.remove(&key).await.expect("removing twice is fine");
        assert_eq!(cache.get(&key).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn purge_drops_only_expired_entries(clock: Arc<MutableClock>) {
        let cache = cache_with(&clock);
        let short = RecipeCacheKey::new("short").expect("valid key");
        let long = RecipeCacheKey::new("long").expect("valid key");
        cache.set(&short, json!(1), policy(1, None)).await.expect("stored");
        cache.set(&long, json!(2), policy(30, None)).await.expect("stored");

        clock.advance(MINUTE * 2);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&long).await, Ok(Some(json!(2))));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn purge_loop_stops_on_shutdown(clock: Arc<MutableClock>) {
        let cache = Arc::new(cache_with(&clock));
        cache
            .set(&RecipeCacheKey::all(), json!(1), policy(1, None))
            .await
            .expect("stored");
        clock.advance(MINUTE * 2);

        let shutdown = CancellationToken::new();
        let task = tokio::spawn(run_purge_loop(
            Arc::clone(&cache),
            Duration::from_secs(30),
            shutdown.clone(),
        ));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(cache.is_empty());

        shutdown.cancel();
        task.await.expect("purge loop exits cleanly");
    }
}
