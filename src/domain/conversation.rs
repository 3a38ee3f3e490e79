use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// WhatsApp thread keyed by phone number within an establishment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: i32,
    pub establishment_id: i32,
    /// Set once the phone matches a client record.
    pub client_id: Option<i32>,
    pub phone: String,
    /// Cleared when a human agent takes the thread over.
    pub ai_enabled: bool,
    pub last_message_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewConversation {
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub phone: String,
    pub last_message_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: i32,
    pub conversation_id: i32,
    pub direction: MessageDirection,
    pub content: String,
    /// Provider message id used to reconcile delivery receipts.
    pub provider_ref: Option<String>,
    pub status: MessageStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageDirection {
    In,
    Out,
}

impl Display for MessageDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageDirection::In => write!(f, "In"),
            MessageDirection::Out => write!(f, "Out"),
        }
    }
}

impl From<&str> for MessageDirection {
    fn from(s: &str) -> Self {
        match s {
            "Out" => MessageDirection::Out,
            _ => MessageDirection::In,
        }
    }
}

impl From<String> for MessageDirection {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageStatus {
    Queued,
    Sent,
    Delivered,
    Read,
    Failed,
}

impl Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageStatus::Queued => write!(f, "Queued"),
            MessageStatus::Sent => write!(f, "Sent"),
            MessageStatus::Delivered => write!(f, "Delivered"),
            MessageStatus::Read => write!(f, "Read"),
            MessageStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl From<&str> for MessageStatus {
    fn from(s: &str) -> Self {
        match s {
            "Sent" => MessageStatus::Sent,
            "Delivered" => MessageStatus::Delivered,
            "Read" => MessageStatus::Read,
            "Failed" => MessageStatus::Failed,
            _ => MessageStatus::Queued,
        }
    }
}

impl From<String> for MessageStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMessage {
    pub conversation_id: i32,
    pub direction: MessageDirection,
    pub content: String,
    pub provider_ref: Option<String>,
    pub status: MessageStatus,
}
