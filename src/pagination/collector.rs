//! Paginated collector
//!
//! Fetches a collection page by page through the rate-limited client. Pages
//! are requested strictly one after another and items are appended in the
//! order the server delivers them.

use super::types::{Page, PageLayout};
use crate::error::{Error, Result};
use crate::http::{RateLimitedClient, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

/// Progress of one top-level fetch
#[derive(Debug, Default)]
struct PaginationState {
    /// Pages fetched so far
    pages: u64,
    /// Items appended so far
    total_fetched: u64,
}

impl PaginationState {
    fn record_page(&mut self, items: usize) {
        self.pages += 1;
        self.total_fetched += items as u64;
    }
}

/// Collects every item of a paginated collection
pub struct PaginatedCollector<T = ReqwestTransport> {
    client: RateLimitedClient<T>,
    layout: PageLayout,
    fail_on_error_status: bool,
}

impl<T: Transport> PaginatedCollector<T> {
    /// Create a collector using the default Front page layout
    pub fn new(client: RateLimitedClient<T>) -> Self {
        Self {
            client,
            layout: PageLayout::default(),
            fail_on_error_status: true,
        }
    }

    /// Use a custom page layout
    #[must_use]
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Whether a non-2xx page aborts the fetch (default) or is read as a page
    #[must_use]
    pub fn fail_on_error_status(mut self, fail: bool) -> Self {
        self.fail_on_error_status = fail;
        self
    }

    /// Get the underlying client
    pub fn client(&self) -> &RateLimitedClient<T> {
        &self.client
    }

    /// Page layout in use
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Fetch and decode a single page
    pub async fn fetch_page<I: DeserializeOwned>(&self, url: &str) -> Result<Page<I>> {
        let mut response = self.client.get(url).await?;
        if self.fail_on_error_status {
            response = response.error_for_status()?;
        }

        let body: Value = response.json()?;
        Page::from_value(body, &self.layout).map_err(|message| Error::page_decode(url, message))
    }

    /// Fetch every page starting at `url`
    pub async fn collect_all<I: DeserializeOwned>(&self, url: &str) -> Result<Vec<I>> {
        self.collect_into(url, Vec::new()).await
    }

    /// Fetch every page starting at `url`, appending to `items`
    pub async fn collect_into<I: DeserializeOwned>(
        &self,
        url: &str,
        mut items: Vec<I>,
    ) -> Result<Vec<I>> {
        let mut state = PaginationState::default();
        let mut current = url.to_string();

        loop {
            let page: Page<I> = self.fetch_page(&current).await?;
            state.record_page(page.items.len());
            debug!(
                "Page {} of {}: {} items",
                state.pages,
                url,
                page.items.len()
            );
            items.extend(page.items);

            match page.next {
                Some(next) => current = next,
                None => break,
            }
        }

        info!(
            "Collected {} items across {} pages from {}",
            state.total_fetched, state.pages, url
        );
        Ok(items)
    }
}

impl<T> std::fmt::Debug for PaginatedCollector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedCollector")
            .field("client", &self.client)
            .field("layout", &self.layout)
            .field("fail_on_error_status", &self.fail_on_error_status)
            .finish()
    }
}
