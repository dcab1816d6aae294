//! Front API resource payloads
//!
//! Not an exhaustive mapping. Only the `id` of a top-level resource is
//! required; everything else the API may omit is optional. Any field not
//! listed here is kept in `extra` and enum values this crate does not know
//! are kept verbatim, so a resource can be written back out without losing
//! data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `_links` block present on most resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    /// Canonical URL of the resource
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
    /// URLs of related collections
    #[serde(default)]
    pub related: Map<String, Value>,
}

/// A shared or private inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inbox {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(rename = "_links", default)]
    pub links: ResourceLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status stored on a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Archived,
    Unassigned,
    Deleted,
    Assigned,
    #[serde(untagged)]
    Unknown(String),
}

/// A conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<ConversationStatus>,
    #[serde(default)]
    pub assignee: Option<Teammate>,
    #[serde(default)]
    pub recipient: Option<Recipient>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<f64>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(rename = "_links", default)]
    pub links: ResourceLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Front user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teammate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Role of a recipient on a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientRole {
    From,
    To,
    Cc,
    Bcc,
    #[serde(untagged)]
    Unknown(String),
}

/// A message or conversation recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub role: Option<RecipientRole>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A conversation tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Channel a message went through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Custom,
    Email,
    Googleplay,
    Intercom,
    Internal,
    Smooch,
    #[serde(rename = "phone-call")]
    PhoneCall,
    Call,
    Sms,
    Tweet,
    TweetDm,
    Whatsapp,
    YaloWha,
    FrontChat,
    #[serde(untagged)]
    Unknown(String),
}

/// A message within a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type", default)]
    pub message_type: Option<MessageType>,
    #[serde(default)]
    pub is_inbound: bool,
    #[serde(default)]
    pub created_at: Option<f64>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub blurb: Option<String>,
    #[serde(default)]
    pub author: Option<Teammate>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "_links", default)]
    pub links: ResourceLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An internal comment on a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub author: Option<Teammate>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub posted_at: Option<f64>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "_links", default)]
    pub links: ResourceLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file attached to a message or comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    /// Download URL; fetched through the rate-limited client
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
