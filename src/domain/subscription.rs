use std::fmt::Display;

use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPlan {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: BillingCycle,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSubscriptionPlan {
    pub establishment_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: BillingCycle,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// Next period boundary after `from`.
    pub fn advance(self, from: NaiveDateTime) -> NaiveDateTime {
        let months = match self {
            BillingCycle::Monthly => Months::new(1),
            BillingCycle::Yearly => Months::new(12),
        };
        from.checked_add_months(months).unwrap_or(from)
    }
}

impl Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingCycle::Monthly => write!(f, "Monthly"),
            BillingCycle::Yearly => write!(f, "Yearly"),
        }
    }
}

impl From<&str> for BillingCycle {
    fn from(s: &str) -> Self {
        match s {
            "Yearly" => BillingCycle::Yearly,
            _ => BillingCycle::Monthly,
        }
    }
}

impl From<String> for BillingCycle {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: i32,
    pub plan_id: i32,
    /// Gateway subscription id once provisioned.
    pub provider_ref: Option<String>,
    pub status: SubscriptionStatus,
    pub started_at: NaiveDateTime,
    pub canceled_at: Option<NaiveDateTime>,
    pub current_period_end: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Pending,
    Active,
    PastDue,
    Canceled,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Pending => write!(f, "Pending"),
            SubscriptionStatus::Active => write!(f, "Active"),
            SubscriptionStatus::PastDue => write!(f, "PastDue"),
            SubscriptionStatus::Canceled => write!(f, "Canceled"),
        }
    }
}

impl From<&str> for SubscriptionStatus {
    fn from(s: &str) -> Self {
        match s {
            "Active" => SubscriptionStatus::Active,
            "PastDue" => SubscriptionStatus::PastDue,
            "Canceled" => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::Pending,
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSubscription {
    pub establishment_id: i32,
    pub client_id: i32,
    pub plan_id: i32,
    pub started_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::BillingCycle;

    #[test]
    fn monthly_cycle_advances_one_month() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let next = BillingCycle::Monthly.advance(from);
        // chrono clamps to the end of February
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn yearly_cycle_advances_twelve_months() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let next = BillingCycle::Yearly.advance(from);
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2027, 3, 10).unwrap());
    }
}
