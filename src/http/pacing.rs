//! Client-side pacing
//!
//! A governor quota checked before every attempt. The limiter reads time from
//! tokio, so waits follow the runtime clock (and its paused test clock)
//! rather than the wall clock.

use crate::config::ThrottleConfig;
use governor::clock::Clock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Instant;

/// Clock backed by `tokio::time`
#[derive(Debug, Clone, Copy, Default)]
struct TokioClock;

impl Clock for TokioClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

type Limiter = RateLimiter<NotKeyed, InMemoryState, TokioClock, NoOpMiddleware<Instant>>;

/// Spaces out attempts to stay under a per-minute budget
pub(crate) struct Pacer {
    limiter: Limiter,
    clock: TokioClock,
}

impl Pacer {
    /// Zero values are clamped to one
    pub(crate) fn new(config: &ThrottleConfig) -> Self {
        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
        let clock = TokioClock;

        Self {
            limiter: RateLimiter::direct_with_clock(
                Quota::per_minute(per_minute).allow_burst(burst),
                &clock,
            ),
            clock,
        }
    }

    /// Wait until the budget allows one more attempt
    pub(crate) async fn ready(&self) {
        while let Err(not_until) = self.limiter.check() {
            tokio::time::sleep(not_until.wait_time_from(self.clock.now())).await;
        }
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer").finish_non_exhaustive()
    }
}
