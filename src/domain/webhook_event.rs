use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Raw provider delivery recorded before any processing. Deliveries are
/// not deduplicated; a redelivered event re-applies the same conditional
/// update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WebhookEvent {
    pub id: i32,
    pub provider: WebhookProvider,
    pub event_type: String,
    pub payload: String,
    pub status: WebhookStatus,
    pub error: Option<String>,
    pub received_at: NaiveDateTime,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WebhookProvider {
    Asaas,
    Uazapi,
}

impl Display for WebhookProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookProvider::Asaas => write!(f, "Asaas"),
            WebhookProvider::Uazapi => write!(f, "Uazapi"),
        }
    }
}

impl From<&str> for WebhookProvider {
    fn from(s: &str) -> Self {
        match s {
            "Uazapi" => WebhookProvider::Uazapi,
            _ => WebhookProvider::Asaas,
        }
    }
}

impl From<String> for WebhookProvider {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WebhookStatus {
    Received,
    Processed,
    /// Event type the handler does not act on; acknowledged with 200.
    Ignored,
    Failed,
}

impl Display for WebhookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookStatus::Received => write!(f, "Received"),
            WebhookStatus::Processed => write!(f, "Processed"),
            WebhookStatus::Ignored => write!(f, "Ignored"),
            WebhookStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl From<&str> for WebhookStatus {
    fn from(s: &str) -> Self {
        match s {
            "Processed" => WebhookStatus::Processed,
            "Ignored" => WebhookStatus::Ignored,
            "Failed" => WebhookStatus::Failed,
            _ => WebhookStatus::Received,
        }
    }
}

impl From<String> for WebhookStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWebhookEvent {
    pub provider: WebhookProvider,
    pub event_type: String,
    pub payload: String,
}
