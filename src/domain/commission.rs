use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Commission owed to a professional for a settled payment. Refunds book a
/// compensating entry with a negative amount instead of deleting history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CommissionEntry {
    pub id: i32,
    pub establishment_id: i32,
    pub professional_id: i32,
    pub payment_id: i32,
    pub rate_bps: i32,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCommissionEntry {
    pub establishment_id: i32,
    pub professional_id: i32,
    pub payment_id: i32,
    pub rate_bps: i32,
    pub amount_cents: i64,
}

/// Integer basis-point commission, rounded down to whole cents.
pub fn commission_amount_cents(amount_cents: i64, rate_bps: i32) -> i64 {
    amount_cents * i64::from(rate_bps) / 10_000
}

#[cfg(test)]
mod tests {
    use super::commission_amount_cents;

    #[test]
    fn rounds_down_to_whole_cents() {
        assert_eq!(commission_amount_cents(10_000, 4_000), 4_000);
        assert_eq!(commission_amount_cents(9_999, 3_333), 3_332);
        assert_eq!(commission_amount_cents(0, 5_000), 0);
    }

    #[test]
    fn negative_amounts_reverse_commissions() {
        assert_eq!(commission_amount_cents(-10_000, 4_000), -4_000);
    }
}
