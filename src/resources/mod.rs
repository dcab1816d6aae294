//! Front API resources
//!
//! Typed payloads for the collections an export walks (inboxes, conversations,
//! messages, comments) and [`FrontApi`], which maps each one to its endpoint.

mod api;
mod types;

pub use api::FrontApi;
pub use types::{
    Attachment, Comment, Conversation, ConversationStatus, Inbox, Message, MessageType, Recipient,
    RecipientRole, ResourceLinks, Tag, Teammate,
};
