//! Per-user rate limiting using Governor.
//!
//! Each user gets an independent token bucket, so one chatty user cannot
//! starve the others. Buckets that have refilled completely are dropped
//! by [`RateLimiterState::prune`].

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use profit_types::UserId;

/// Seconds a throttled client is told to wait.
pub const RETRY_AFTER_SECONDS: u64 = 60;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    limiter: Arc<DefaultKeyedRateLimiter<UserId>>,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(60)
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// # Arguments
    /// * `requests` - Number of requests allowed per period (at least 1)
    /// * `period` - Time period for the quota
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, user_id: UserId) -> bool {
        self.limiter.check_key(&user_id).is_ok()
    }

    /// Drops the buckets of users whose quota has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of users currently holding a bucket.
    pub fn tracked_users(&self) -> usize {
        self.limiter.len()
    }

    /// Prunes on a fixed interval until the returned task is aborted.
    pub fn spawn_pruning(&self, every: Duration) -> JoinHandle<()> {
        let limiter = self.limiter.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                limiter.retain_recent();
                limiter.shrink_to_fit();
                tracing::debug!(tracked_users = limiter.len(), "Pruned rate limiters");
            }
        })
    }
}
