use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::commission::{
    CommissionEntry as DomainCommissionEntry, NewCommissionEntry as DomainNewCommissionEntry,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::commission_entries)]
pub struct CommissionEntry {
    pub id: i32,
    pub establishment_id: i32,
    pub professional_id: i32,
    pub payment_id: i32,
    pub rate_bps: i32,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::commission_entries)]
pub struct NewCommissionEntry {
    pub establishment_id: i32,
    pub professional_id: i32,
    pub payment_id: i32,
    pub rate_bps: i32,
    pub amount_cents: i64,
}

impl From<CommissionEntry> for DomainCommissionEntry {
    fn from(entry: CommissionEntry) -> Self {
        Self {
            id: entry.id,
            establishment_id: entry.establishment_id,
            professional_id: entry.professional_id,
            payment_id: entry.payment_id,
            rate_bps: entry.rate_bps,
            amount_cents: entry.amount_cents,
            created_at: entry.created_at,
        }
    }
}

impl From<&DomainNewCommissionEntry> for NewCommissionEntry {
    fn from(entry: &DomainNewCommissionEntry) -> Self {
        Self {
            establishment_id: entry.establishment_id,
            professional_id: entry.professional_id,
            payment_id: entry.payment_id,
            rate_bps: entry.rate_bps,
            amount_cents: entry.amount_cents,
        }
    }
}
