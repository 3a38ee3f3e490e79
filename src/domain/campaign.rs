use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    /// Message template; `{name}` is replaced with the client name.
    pub message: String,
    pub audience: CampaignAudience,
    pub status: CampaignStatus,
    pub scheduled_at: Option<NaiveDateTime>,
    pub sent_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Campaign {
    pub fn render_message(&self, client_name: &str) -> String {
        self.message.replace("{name}", client_name)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignAudience {
    All,
    /// Clients whose birthday falls in the current month.
    BirthdayMonth,
    /// Clients without an appointment in the last 90 days.
    Inactive90d,
}

impl Display for CampaignAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignAudience::All => write!(f, "All"),
            CampaignAudience::BirthdayMonth => write!(f, "BirthdayMonth"),
            CampaignAudience::Inactive90d => write!(f, "Inactive90d"),
        }
    }
}

impl From<&str> for CampaignAudience {
    fn from(s: &str) -> Self {
        match s {
            "BirthdayMonth" => CampaignAudience::BirthdayMonth,
            "Inactive90d" => CampaignAudience::Inactive90d,
            _ => CampaignAudience::All,
        }
    }
}

impl From<String> for CampaignAudience {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Sending,
    Sent,
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "Draft"),
            CampaignStatus::Sending => write!(f, "Sending"),
            CampaignStatus::Sent => write!(f, "Sent"),
        }
    }
}

impl From<&str> for CampaignStatus {
    fn from(s: &str) -> Self {
        match s {
            "Sending" => CampaignStatus::Sending,
            "Sent" => CampaignStatus::Sent,
            _ => CampaignStatus::Draft,
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCampaign {
    pub establishment_id: i32,
    pub name: String,
    pub message: String,
    pub audience: CampaignAudience,
    pub scheduled_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCampaign {
    pub name: String,
    pub message: String,
    pub audience: CampaignAudience,
    pub scheduled_at: Option<NaiveDateTime>,
}
