//! Rate limit signals carried in response headers
//!
//! Front reports its budget on every response. A `retry-after` header means
//! the caller has to pause; the other headers only explain why.

use reqwest::header::HeaderMap;
use std::fmt;
use std::time::Duration;

/// Requests left in the global window
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Seconds to wait before the next request
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Burst limit bucket that was hit
pub const TIER_HEADER: &str = "x-front-tier";

/// Global requests-per-minute ceiling
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Rate limit state read from a single response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitSignal {
    /// Requests remaining in the global window
    pub remaining: Option<u64>,
    /// Seconds the server asks us to wait
    pub retry_after_seconds: Option<u64>,
    /// Burst tier identifier
    pub tier: Option<String>,
    /// Global limit
    pub global_limit: Option<u64>,
}

impl RateLimitSignal {
    /// Read the signal from response headers
    ///
    /// Missing or non-numeric values are treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: header_u64(headers, REMAINING_HEADER),
            retry_after_seconds: header_u64(headers, RETRY_AFTER_HEADER),
            tier: header_str(headers, TIER_HEADER),
            global_limit: header_u64(headers, LIMIT_HEADER),
        }
    }

    /// How long to pause, if at all
    pub fn wait_duration(&self) -> Option<Duration> {
        match self.retry_after_seconds {
            Some(secs) if secs > 0 => Some(Duration::from_millis(secs * 1000)),
            _ => None,
        }
    }

    /// Which limit caused the wait, if there is one
    pub fn cause(&self) -> Option<LimitCause> {
        self.wait_duration()?;

        match self.remaining {
            Some(remaining) if remaining > 0 => Some(LimitCause::Burst {
                tier: self.tier.clone(),
            }),
            _ => Some(LimitCause::Global {
                limit: self.global_limit,
            }),
        }
    }
}

/// Why the server asked for a pause; only used for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitCause {
    /// Global budget left but a resource burst bucket is full
    Burst {
        /// Burst tier from `x-front-tier`
        tier: Option<String>,
    },
    /// Global budget exhausted
    Global {
        /// Limit from `x-ratelimit-limit`
        limit: Option<u64>,
    },
}

impl fmt::Display for LimitCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Burst { tier: Some(tier) } => write!(f, "tier {tier} resource burst limit reached"),
            Self::Burst { tier: None } => write!(f, "resource burst limit reached"),
            Self::Global { limit: Some(limit) } => write!(f, "global rate limit of {limit} reached"),
            Self::Global { limit: None } => write!(f, "global rate limit reached"),
        }
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_str(headers, name).and_then(|s| s.parse().ok())
}
