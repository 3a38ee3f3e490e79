use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::payment::{NewPayment as DomainNewPayment, Payment as DomainPayment};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub subscription_id: Option<i32>,
    pub provider: String,
    pub provider_ref: Option<String>,
    pub method: String,
    pub amount_cents: i64,
    pub status: String,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub subscription_id: Option<i32>,
    pub provider: String,
    pub provider_ref: Option<&'a str>,
    pub method: String,
    pub amount_cents: i64,
    pub status: String,
    pub paid_at: Option<NaiveDateTime>,
}

impl From<Payment> for DomainPayment {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            establishment_id: payment.establishment_id,
            client_id: payment.client_id,
            appointment_id: payment.appointment_id,
            subscription_id: payment.subscription_id,
            provider: payment.provider.into(),
            provider_ref: payment.provider_ref,
            method: payment.method.into(),
            amount_cents: payment.amount_cents,
            status: payment.status.into(),
            paid_at: payment.paid_at,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            establishment_id: payment.establishment_id,
            client_id: payment.client_id,
            appointment_id: payment.appointment_id,
            subscription_id: payment.subscription_id,
            provider: payment.provider.to_string(),
            provider_ref: payment.provider_ref.as_deref(),
            method: payment.method.to_string(),
            amount_cents: payment.amount_cents,
            status: payment.status.to_string(),
            paid_at: payment.paid_at,
        }
    }
}
