//! Pagination module
//!
//! Follows next-page URLs embedded in response bodies until the server stops
//! returning one, flattening every page into a single ordered `Vec`.
//!
//! # Overview
//!
//! [`PageLayout`] says where a page keeps its items and its cursor (Front uses
//! `_results` and `_pagination.next`). [`PaginatedCollector`] drives the
//! [`RateLimitedClient`](crate::http::RateLimitedClient) one page at a time.

mod collector;
mod types;

pub use collector::PaginatedCollector;
pub use types::{Page, PageLayout};

#[cfg(test)]
mod tests;
