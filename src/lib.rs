// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Front Export
//!
//! A rate-limited, paginated client for exporting collections from the Front
//! REST API into memory.
//!
//! ## Features
//!
//! - **Header-driven rate limiting**: `retry-after` is honoured on every response
//! - **Transparent 429 retries**: rate-limited requests are re-issued after the wait
//! - **Cursor pagination**: `_pagination.next` is followed until the collection ends
//! - **Typed or opaque items**: collect into any `DeserializeOwned` type
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use front_export::{ClientConfig, PaginatedCollector, RateLimitedClient, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Arc::new(ClientConfig::from_env()?);
//!     let collector = PaginatedCollector::new(RateLimitedClient::new(config)?);
//!
//!     let inboxes: Vec<serde_json::Value> = collector.collect_all("/inboxes").await?;
//!     println!("{} inboxes", inboxes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  FrontApi (inboxes, conversations, ...)      │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │  PaginatedCollector   page → items + cursor  │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │  RateLimitedClient    wait / retry on 429    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │  Transport (reqwest)                         │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Rate-limited HTTP executor
pub mod http;

/// Paginated collection
pub mod pagination;

/// Front API resources and endpoints
pub mod resources;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, ThrottleConfig};
pub use error::{Error, Result};
pub use http::{RateLimitedClient, Transport};
pub use pagination::{Page, PageLayout, PaginatedCollector};
pub use resources::FrontApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
