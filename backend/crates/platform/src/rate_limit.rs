//! Rate Limiting Infrastructure
//!
//! Fixed-window attempt counting keyed by an arbitrary string
//! (typically a client IP).

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Time until the current window closes
    pub retry_after: Duration,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one attempt for `key` and report whether it is within the limit
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult;

    /// Forget every attempt recorded for `key`
    async fn reset(&self, key: &str);
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Process-local store.
///
/// Counters live in memory, so they reset on restart and are not shared
/// between instances.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn check_at(&self, key: &str, config: &RateLimitConfig, now: Instant) -> RateLimitResult {
        let mut windows = self.windows.lock().await;

        // Drop closed windows so the map doesn't grow without bound
        windows.retain(|_, w| now.duration_since(w.started_at) < config.window);

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        let retry_after = config
            .window
            .saturating_sub(now.duration_since(window.started_at));

        if window.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                retry_after,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - window.count,
            retry_after,
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(key, config, Instant::now()).await
    }

    async fn reset(&self, key: &str) {
        self.windows.lock().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRateLimitStore, RateLimitConfig, RateLimitStore};
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_blocks_after_limit() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        for expected_remaining in [2, 1, 0] {
            let result = store.check_and_increment("1.2.3.4", &config).await;
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let blocked = store.check_and_increment("1.2.3.4", &config).await;
        assert!(!blocked.allowed);
        assert!(blocked.retry_after <= Duration::from_secs(60));
        assert!(blocked.retry_after > Duration::ZERO);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_and_increment("a", &config).await.allowed);
        assert!(!store.check_and_increment("a", &config).await.allowed);
        assert!(store.check_and_increment("b", &config).await.allowed);
    }

    #[tokio::test]
    async fn test_reset_clears_key() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_and_increment("a", &config).await.allowed);
        store.reset("a").await;
        assert!(store.check_and_increment("a", &config).await.allowed);
    }

    #[tokio::test]
    async fn test_window_expiry() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);
        let start = Instant::now();

        assert!(store.check_at("a", &config, start).await.allowed);
        assert!(!store.check_at("a", &config, start + Duration::from_secs(59)).await.allowed);
        assert!(store.check_at("a", &config, start + Duration::from_secs(61)).await.allowed);
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window, Duration::from_secs(900));
    }
}
