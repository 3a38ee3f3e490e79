//! Reconciliation of Asaas payment-gateway events against local
//! payments, subscriptions, and commissions.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::payment::{NewPayment, Payment, PaymentMethod, PaymentProvider, PaymentStatus};
use crate::domain::subscription::SubscriptionStatus;
use crate::domain::webhook_event::WebhookStatus;
use crate::repository::{
    AppointmentReader, CommissionReader, CommissionWriter, PaymentReader, PaymentWriter,
    ProfessionalReader, ServiceReader, SubscriptionReader, SubscriptionWriter,
};
use crate::services::finance::{book_commission_for_payment, reverse_commission_for_payment};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Deserialize)]
pub struct AsaasEvent {
    pub event: String,
    #[serde(default)]
    pub payment: Option<AsaasPayment>,
}

#[derive(Debug, Deserialize)]
pub struct AsaasPayment {
    pub id: String,
    /// Decimal value in reais as the gateway sends it.
    pub value: f64,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default, rename = "billingType")]
    pub billing_type: Option<String>,
    #[serde(default, rename = "externalReference")]
    pub external_reference: Option<String>,
    #[serde(default, rename = "paymentDate")]
    pub payment_date: Option<NaiveDate>,
}

/// Local entity a gateway payment points at, parsed from
/// `externalReference` (`appt:<id>` / `sub:<id>`) or the gateway
/// subscription id.
#[derive(Debug, PartialEq, Eq)]
enum PaymentLink {
    Appointment(i32),
    Subscription(i32),
    None,
}

fn parse_external_reference(reference: Option<&str>) -> PaymentLink {
    let Some(reference) = reference else {
        return PaymentLink::None;
    };
    if let Some(id) = reference.strip_prefix("appt:").and_then(|v| v.parse().ok()) {
        return PaymentLink::Appointment(id);
    }
    if let Some(id) = reference.strip_prefix("sub:").and_then(|v| v.parse().ok()) {
        return PaymentLink::Subscription(id);
    }
    PaymentLink::None
}

fn method_from_billing_type(billing_type: Option<&str>) -> PaymentMethod {
    match billing_type {
        Some("PIX") => PaymentMethod::Pix,
        Some("CREDIT_CARD") | Some("DEBIT_CARD") => PaymentMethod::Card,
        Some("BOLETO") => PaymentMethod::Boleto,
        Some(other) => PaymentMethod::Other(other.to_string()),
        None => PaymentMethod::Other("Unknown".to_string()),
    }
}

fn amount_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Applies one gateway event. Events that cannot be tied to any local
/// entity are acknowledged and marked `Ignored` rather than failed.
pub fn apply_asaas_event<R>(repo: &R, raw: &str) -> ServiceResult<WebhookStatus>
where
    R: PaymentReader
        + PaymentWriter
        + SubscriptionReader
        + SubscriptionWriter
        + AppointmentReader
        + ProfessionalReader
        + ServiceReader
        + CommissionReader
        + CommissionWriter
        + ?Sized,
{
    let event: AsaasEvent = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Validation(format!("invalid Asaas payload: {e}")))?;

    let Some(payment_payload) = event.payment else {
        return Ok(WebhookStatus::Ignored);
    };

    match event.event.as_str() {
        "PAYMENT_CREATED" => {
            match find_or_create_payment(repo, &payment_payload)? {
                Some(_) => Ok(WebhookStatus::Processed),
                None => Ok(WebhookStatus::Ignored),
            }
        }
        "PAYMENT_RECEIVED" | "PAYMENT_CONFIRMED" => {
            let Some(payment) = find_or_create_payment(repo, &payment_payload)? else {
                return Ok(WebhookStatus::Ignored);
            };

            let paid_at = payment_payload
                .payment_date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_else(|| Utc::now().naive_utc());
            let settled = repo.set_payment_status(payment.id, PaymentStatus::Paid, Some(paid_at))?;

            book_commission_for_payment(repo, &settled)?;
            activate_linked_subscription(repo, &settled, paid_at)?;

            Ok(WebhookStatus::Processed)
        }
        "PAYMENT_OVERDUE" => {
            let Some(payment) = find_payment(repo, &payment_payload)? else {
                return Ok(WebhookStatus::Ignored);
            };
            repo.set_payment_status(payment.id, PaymentStatus::Overdue, payment.paid_at)?;

            if let Some(subscription_id) = payment.subscription_id {
                if let Some(subscription) =
                    repo.get_subscription_by_id(subscription_id, payment.establishment_id)?
                {
                    if subscription.status != SubscriptionStatus::Canceled {
                        repo.set_subscription_status(
                            subscription.id,
                            SubscriptionStatus::PastDue,
                            subscription.current_period_end,
                            subscription.canceled_at,
                        )?;
                    }
                }
            }

            Ok(WebhookStatus::Processed)
        }
        "PAYMENT_REFUNDED" => {
            let Some(payment) = find_payment(repo, &payment_payload)? else {
                return Ok(WebhookStatus::Ignored);
            };
            let refunded =
                repo.set_payment_status(payment.id, PaymentStatus::Refunded, payment.paid_at)?;
            reverse_commission_for_payment(repo, &refunded)?;

            Ok(WebhookStatus::Processed)
        }
        "PAYMENT_DELETED" => {
            let Some(payment) = find_payment(repo, &payment_payload)? else {
                return Ok(WebhookStatus::Ignored);
            };
            repo.set_payment_status(payment.id, PaymentStatus::Canceled, payment.paid_at)?;

            Ok(WebhookStatus::Processed)
        }
        _ => Ok(WebhookStatus::Ignored),
    }
}

fn find_payment<R>(repo: &R, payload: &AsaasPayment) -> ServiceResult<Option<Payment>>
where
    R: PaymentReader + ?Sized,
{
    Ok(repo.get_payment_by_provider_ref(PaymentProvider::Asaas, &payload.id)?)
}

/// Looks the payment up by gateway id, creating a `Pending` row on first
/// sight when it can be linked to a local appointment or subscription.
fn find_or_create_payment<R>(repo: &R, payload: &AsaasPayment) -> ServiceResult<Option<Payment>>
where
    R: PaymentReader + PaymentWriter + SubscriptionReader + AppointmentReader + ?Sized,
{
    if let Some(existing) = find_payment(repo, payload)? {
        return Ok(Some(existing));
    }

    let link = match parse_external_reference(payload.external_reference.as_deref()) {
        PaymentLink::None => match payload.subscription.as_deref() {
            Some(provider_ref) => repo
                .get_subscription_by_provider_ref(provider_ref)?
                .map(|s| PaymentLink::Subscription(s.id))
                .unwrap_or(PaymentLink::None),
            None => PaymentLink::None,
        },
        link => link,
    };

    let (establishment_id, client_id, appointment_id, subscription_id) = match link {
        PaymentLink::Appointment(id) => {
            // The reference does not carry the tenant, so look the
            // appointment up across establishments via its own row.
            let Some(appointment) = lookup_appointment(repo, id)? else {
                return Ok(None);
            };
            (
                appointment.establishment_id,
                Some(appointment.client_id),
                Some(appointment.id),
                None,
            )
        }
        PaymentLink::Subscription(id) => {
            let Some(subscription) = lookup_subscription(repo, id)? else {
                return Ok(None);
            };
            (
                subscription.establishment_id,
                Some(subscription.client_id),
                None,
                Some(subscription.id),
            )
        }
        PaymentLink::None => return Ok(None),
    };

    let new_payment = NewPayment {
        establishment_id,
        client_id,
        appointment_id,
        subscription_id,
        provider: PaymentProvider::Asaas,
        provider_ref: Some(payload.id.clone()),
        method: method_from_billing_type(payload.billing_type.as_deref()),
        amount_cents: amount_cents(payload.value),
        status: PaymentStatus::Pending,
        paid_at: None,
    };

    Ok(Some(repo.create_payment(&new_payment)?))
}

fn lookup_appointment<R>(
    repo: &R,
    appointment_id: i32,
) -> ServiceResult<Option<crate::domain::appointment::Appointment>>
where
    R: AppointmentReader + ?Sized,
{
    Ok(repo.find_appointment(appointment_id)?)
}

fn lookup_subscription<R>(
    repo: &R,
    subscription_id: i32,
) -> ServiceResult<Option<crate::domain::subscription::Subscription>>
where
    R: SubscriptionReader + ?Sized,
{
    Ok(repo.find_subscription(subscription_id)?)
}

/// A settled subscription payment re-activates the subscription and
/// advances the period boundary by one billing cycle.
fn activate_linked_subscription<R>(
    repo: &R,
    payment: &Payment,
    paid_at: chrono::NaiveDateTime,
) -> ServiceResult<()>
where
    R: SubscriptionReader + SubscriptionWriter + ?Sized,
{
    let Some(subscription_id) = payment.subscription_id else {
        return Ok(());
    };
    let Some(subscription) =
        repo.get_subscription_by_id(subscription_id, payment.establishment_id)?
    else {
        return Ok(());
    };
    if subscription.status == SubscriptionStatus::Canceled {
        return Ok(());
    }

    let Some(plan) = repo.get_plan_by_id(subscription.plan_id, subscription.establishment_id)?
    else {
        return Ok(());
    };

    let period_end = plan.billing_cycle.advance(paid_at);
    repo.set_subscription_status(
        subscription.id,
        SubscriptionStatus::Active,
        Some(period_end),
        subscription.canceled_at,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_reference_parsing() {
        assert_eq!(
            parse_external_reference(Some("appt:42")),
            PaymentLink::Appointment(42)
        );
        assert_eq!(
            parse_external_reference(Some("sub:7")),
            PaymentLink::Subscription(7)
        );
        assert_eq!(parse_external_reference(Some("order-9")), PaymentLink::None);
        assert_eq!(parse_external_reference(Some("appt:x")), PaymentLink::None);
        assert_eq!(parse_external_reference(None), PaymentLink::None);
    }

    #[test]
    fn billing_type_maps_to_method() {
        assert_eq!(method_from_billing_type(Some("PIX")), PaymentMethod::Pix);
        assert_eq!(
            method_from_billing_type(Some("CREDIT_CARD")),
            PaymentMethod::Card
        );
        assert_eq!(
            method_from_billing_type(Some("BOLETO")),
            PaymentMethod::Boleto
        );
        assert_eq!(
            method_from_billing_type(None),
            PaymentMethod::Other("Unknown".to_string())
        );
    }

    #[test]
    fn values_convert_to_cents() {
        assert_eq!(amount_cents(45.0), 4500);
        assert_eq!(amount_cents(19.99), 1999);
        assert_eq!(amount_cents(0.1), 10);
    }
}
