//! Login Rate Limiting
//!
//! Token-bucket limiter keyed by client IP. Buckets are created lazily on
//! first sight of a key and swept periodically once idle.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::utils::{AppError, AppResult};

/// Limiter tuning knobs
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Bucket capacity, also the initial fill
    pub burst: u32,
    /// Time to mint one token
    pub refill_interval: Duration,
    /// Idle time after which a bucket is evicted
    pub retention: Duration,
    /// Sweep cadence for the background task
    pub sweep_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: 5,
            refill_interval: Duration::from_secs(12),
            retention: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    /// Tokens currently available
    tokens: f64,
    /// Last refill/consume instant
    updated_at: Instant,
}

/// Concurrent token-bucket limiter for the login endpoint
pub struct LoginRateLimiter {
    config: RateLimitConfig,
    buckets: DashMap<String, Bucket>,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            buckets: DashMap::new(),
        })
    }

    /// Consume one token for `key`, or reject with `RateLimited`
    pub fn check(&self, key: &str) -> AppResult<()> {
        self.check_at(key, Instant::now())
    }

    /// Clock-injected variant of [`check`](Self::check); tests advance time
    /// by passing synthetic instants.
    pub fn check_at(&self, key: &str, now: Instant) -> AppResult<()> {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket {
                tokens: self.config.burst as f64,
                updated_at: now,
            });

        let elapsed = now.saturating_duration_since(bucket.updated_at);
        let minted = elapsed.as_secs_f64() / self.config.refill_interval.as_secs_f64();
        bucket.tokens = (bucket.tokens + minted).min(self.config.burst as f64);
        bucket.updated_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            tracing::warn!(key, "Login rate limit exceeded");
            Err(AppError::RateLimited)
        }
    }

    /// Drop buckets idle longer than the retention window
    pub fn evict_idle(&self) {
        self.evict_idle_at(Instant::now());
    }

    pub fn evict_idle_at(&self, now: Instant) {
        let retention = self.config.retention;
        let before = self.buckets.len();
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.updated_at) < retention);
        let evicted = before - self.buckets.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.buckets.len(), "Swept idle rate-limit buckets");
        }
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Periodic sweep loop, cancelled on shutdown
    pub async fn run_sweeper(self: Arc<Self>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.sweep_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Rate-limit sweeper stopping");
                    break;
                }
                _ = interval.tick() => {
                    self.evict_idle();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> Arc<LoginRateLimiter> {
        LoginRateLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn burst_allows_five_then_denies() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..5 {
            limiter.check_at("10.0.0.1", now).expect("within burst");
        }
        assert!(matches!(
            limiter.check_at("10.0.0.1", now),
            Err(AppError::RateLimited)
        ));
    }

    #[test]
    fn refill_grants_one_token_per_interval() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..5 {
            limiter.check_at("10.0.0.2", start).expect("within burst");
        }
        assert!(limiter.check_at("10.0.0.2", start).is_err());

        // One refill interval later a single attempt passes, a second fails
        let later = start + Duration::from_secs(12);
        limiter.check_at("10.0.0.2", later).expect("refilled");
        assert!(limiter.check_at("10.0.0.2", later).is_err());
    }

    #[test]
    fn keys_are_independent() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..5 {
            limiter.check_at("10.0.0.3", now).expect("within burst");
        }
        assert!(limiter.check_at("10.0.0.3", now).is_err());
        limiter.check_at("10.0.0.4", now).expect("fresh key");
    }

    #[test]
    fn tokens_cap_at_burst() {
        let limiter = limiter();
        let start = Instant::now();

        limiter.check_at("10.0.0.5", start).expect("first");

        // A long idle period must not accumulate more than the burst
        let much_later = start + Duration::from_secs(3600);
        for _ in 0..5 {
            limiter.check_at("10.0.0.5", much_later).expect("within burst");
        }
        assert!(limiter.check_at("10.0.0.5", much_later).is_err());
    }

    #[test]
    fn sweep_evicts_only_idle_buckets() {
        let limiter = limiter();
        let start = Instant::now();

        limiter.check_at("idle", start).expect("idle key");
        let later = start + Duration::from_secs(299);
        limiter.check_at("fresh", later).expect("fresh key");

        limiter.evict_idle_at(start + Duration::from_secs(301));
        assert_eq!(limiter.bucket_count(), 1);

        // Evicted key starts over with a full burst
        for _ in 0..5 {
            limiter
                .check_at("idle", start + Duration::from_secs(400))
                .expect("fresh bucket");
        }
    }
}
