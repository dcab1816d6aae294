//! Front endpoints built on the paginated collector

use super::types::{Attachment, Comment, Conversation, Inbox, Message};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{RateLimitedClient, ReqwestTransport, Transport};
use crate::pagination::PaginatedCollector;
use bytes::Bytes;
use std::sync::Arc;
use url::Url;

/// Typed access to the collections an export walks through
///
/// Items are decoded into the lenient types of this module. An item that is
/// not an object or lacks its `id` fails the whole listing with
/// [`Error::PageDecode`]; use [`PaginatedCollector::collect_all`] with
/// `serde_json::Value` to take items unchecked.
#[derive(Debug)]
pub struct FrontApi<T = ReqwestTransport> {
    collector: PaginatedCollector<T>,
}

impl FrontApi<ReqwestTransport> {
    /// Create an API handle backed by reqwest
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let client = RateLimitedClient::new(config)?;
        Ok(Self::with_collector(PaginatedCollector::new(client)))
    }
}

impl<T: Transport> FrontApi<T> {
    /// Wrap an existing collector
    pub fn with_collector(collector: PaginatedCollector<T>) -> Self {
        Self { collector }
    }

    /// Get the underlying collector
    pub fn collector(&self) -> &PaginatedCollector<T> {
        &self.collector
    }

    /// All inboxes visible to the API token
    pub async fn list_inboxes(&self) -> Result<Vec<Inbox>> {
        let url = self.endpoint(&["inboxes"])?;
        self.collector.collect_all(&url).await
    }

    /// All conversations in an inbox
    pub async fn list_inbox_conversations(&self, inbox_id: &str) -> Result<Vec<Conversation>> {
        let url = self.endpoint(&["inboxes", inbox_id, "conversations"])?;
        self.collector.collect_all(&url).await
    }

    /// All messages in a conversation
    pub async fn list_conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let url = self.endpoint(&["conversations", conversation_id, "messages"])?;
        self.collector.collect_all(&url).await
    }

    /// All comments on a conversation
    pub async fn list_conversation_comments(&self, conversation_id: &str) -> Result<Vec<Comment>> {
        let url = self.endpoint(&["conversations", conversation_id, "comments"])?;
        self.collector.collect_all(&url).await
    }

    /// Raw content of an attachment
    pub async fn download_attachment(&self, attachment: &Attachment) -> Result<Bytes> {
        let url = attachment
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Other("attachment has no download url".to_string()))?;
        self.collector.client().get_bytes(url).await
    }

    /// Base URL with percent-encoded path segments appended
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.collector.client().config().base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::config("base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }
}
