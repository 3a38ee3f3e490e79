use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub subscription_id: Option<i32>,
    pub provider: PaymentProvider,
    /// Gateway identifier (e.g. the Asaas payment id) for
    /// provider-originated rows.
    pub provider_ref: Option<String>,
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Refunded,
    Canceled,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Overdue => write!(f, "Overdue"),
            PaymentStatus::Refunded => write!(f, "Refunded"),
            PaymentStatus::Canceled => write!(f, "Canceled"),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "Paid" => PaymentStatus::Paid,
            "Overdue" => PaymentStatus::Overdue,
            "Refunded" => PaymentStatus::Refunded,
            "Canceled" => PaymentStatus::Canceled,
            _ => PaymentStatus::Pending,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
    Boleto,
    Other(String),
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Card => write!(f, "Card"),
            PaymentMethod::Pix => write!(f, "Pix"),
            PaymentMethod::Boleto => write!(f, "Boleto"),
            PaymentMethod::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(s: &str) -> Self {
        match s {
            "Cash" => PaymentMethod::Cash,
            "Card" => PaymentMethod::Card,
            "Pix" => PaymentMethod::Pix,
            "Boleto" => PaymentMethod::Boleto,
            _ => PaymentMethod::Other(s.to_string()),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentProvider {
    /// Recorded at the counter by staff.
    Manual,
    Asaas,
}

impl Display for PaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentProvider::Manual => write!(f, "Manual"),
            PaymentProvider::Asaas => write!(f, "Asaas"),
        }
    }
}

impl From<&str> for PaymentProvider {
    fn from(s: &str) -> Self {
        match s {
            "Asaas" => PaymentProvider::Asaas,
            _ => PaymentProvider::Manual,
        }
    }
}

impl From<String> for PaymentProvider {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPayment {
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub subscription_id: Option<i32>,
    pub provider: PaymentProvider,
    pub provider_ref: Option<String>,
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub paid_at: Option<NaiveDateTime>,
}
