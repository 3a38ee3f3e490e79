use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Professional {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Default commission rate in basis points, applied when the service
    /// performed carries no override.
    pub commission_bps: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProfessional {
    pub establishment_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub commission_bps: i32,
}

impl NewProfessional {
    #[must_use]
    pub fn new(
        establishment_id: i32,
        name: String,
        email: String,
        phone: Option<String>,
        commission_bps: i32,
    ) -> Self {
        Self {
            establishment_id,
            name: name.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            commission_bps: commission_bps.max(0),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProfessional {
    pub name: String,
    pub phone: Option<String>,
    pub commission_bps: i32,
    pub active: bool,
}
