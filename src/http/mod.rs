//! HTTP module
//!
//! Provides the rate-limited request executor that every API call goes through.
//!
//! # Features
//!
//! - **Header-driven waits**: `retry-after` is honoured on every response, not only on 429
//! - **Unbounded 429 retries**: the same request is re-issued until the server lets it through
//! - **Pluggable transport**: [`Transport`] is the only seam to the network
//! - **Optional pacing**: a governor quota checked before every attempt

mod client;
mod pacing;
mod rate_limit;
mod transport;

pub use client::RateLimitedClient;
pub use rate_limit::{
    LimitCause, RateLimitSignal, LIMIT_HEADER, REMAINING_HEADER, RETRY_AFTER_HEADER, TIER_HEADER,
};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
