use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Catalog entry: a bookable service such as a haircut or beard trim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i64,
    /// Commission override in basis points; `None` falls back to the
    /// professional's default rate.
    pub commission_bps: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewService {
    pub establishment_id: i32,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i64,
    pub commission_bps: Option<i32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateService {
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i64,
    pub commission_bps: Option<i32>,
    pub active: bool,
}
