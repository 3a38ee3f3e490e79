//! Payments and commission tracking.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::auth::{AuthenticatedUser, check_role, ensure_role};
use crate::domain::commission::{CommissionEntry, NewCommissionEntry, commission_amount_cents};
use crate::domain::payment::{NewPayment, Payment, PaymentProvider, PaymentStatus};
use crate::forms::finance::ManualPaymentForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    AppointmentReader, CommissionReader, CommissionWriter, PaymentListQuery, PaymentReader,
    PaymentWriter, ProfessionalReader, ServiceReader,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

#[derive(Debug, Default)]
pub struct PaymentsQuery {
    pub status: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PaymentsPageData {
    pub total: usize,
    pub payments: Paginated<Payment>,
}

#[derive(Debug, Serialize)]
pub struct CommissionReport {
    pub professional_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_cents: i64,
    pub entries: Vec<CommissionEntry>,
}

pub fn list_payments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: PaymentsQuery,
) -> ServiceResult<PaymentsPageData>
where
    R: PaymentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = params.page.unwrap_or(1);
    let mut query =
        PaymentListQuery::new(user.establishment_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(status) = params.status.as_deref() {
        query = query.status(status.into());
    }
    if let (Some(from), Some(to)) = (params.from, params.to) {
        query = query.between(day_start(from), day_start(to) + chrono::Duration::days(1));
    }

    let (total, payments) = repo.list_payments(query)?;
    let payments = Paginated::new(payments, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(PaymentsPageData { total, payments })
}

/// Records a counter payment. It settles immediately and books the
/// commission when tied to an appointment.
pub fn create_manual_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ManualPaymentForm,
) -> ServiceResult<Payment>
where
    R: PaymentReader
        + PaymentWriter
        + AppointmentReader
        + ProfessionalReader
        + ServiceReader
        + CommissionReader
        + CommissionWriter
        + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let mut client_id = form.client_id;
    if let Some(appointment_id) = form.appointment_id {
        let appointment = repo
            .get_appointment_by_id(appointment_id, user.establishment_id)?
            .ok_or_else(|| ServiceError::Validation("unknown appointment".to_string()))?;
        client_id = client_id.or(Some(appointment.client_id));
    }

    let new_payment = NewPayment {
        establishment_id: user.establishment_id,
        client_id,
        appointment_id: form.appointment_id,
        subscription_id: None,
        provider: PaymentProvider::Manual,
        provider_ref: None,
        method: form.method.as_str().into(),
        amount_cents: form.amount_cents,
        status: PaymentStatus::Paid,
        paid_at: Some(Utc::now().naive_utc()),
    };

    let payment = repo.create_payment(&new_payment)?;
    book_commission_for_payment(repo, &payment)?;

    Ok(payment)
}

/// Books the commission entry for a settled payment tied to an
/// appointment. The service-level rate overrides the professional's
/// default; a zero rate books nothing. Idempotent per payment.
pub fn book_commission_for_payment<R>(
    repo: &R,
    payment: &Payment,
) -> ServiceResult<Option<CommissionEntry>>
where
    R: AppointmentReader
        + ProfessionalReader
        + ServiceReader
        + CommissionReader
        + CommissionWriter
        + ?Sized,
{
    let Some(appointment_id) = payment.appointment_id else {
        return Ok(None);
    };

    if repo.find_commission_for_payment(payment.id)?.is_some() {
        return Ok(None);
    }

    let Some(appointment) =
        repo.get_appointment_by_id(appointment_id, payment.establishment_id)?
    else {
        return Ok(None);
    };
    let Some(professional) =
        repo.get_professional_by_id(appointment.professional_id, payment.establishment_id)?
    else {
        return Ok(None);
    };

    let rate_bps = repo
        .get_service_by_id(appointment.service_id, payment.establishment_id)?
        .and_then(|s| s.commission_bps)
        .unwrap_or(professional.commission_bps);

    if rate_bps <= 0 {
        return Ok(None);
    }

    let entry = NewCommissionEntry {
        establishment_id: payment.establishment_id,
        professional_id: professional.id,
        payment_id: payment.id,
        rate_bps,
        amount_cents: commission_amount_cents(payment.amount_cents, rate_bps),
    };

    Ok(Some(repo.create_commission_entry(&entry)?))
}

/// Books the compensating negative entry when a commissioned payment is
/// refunded.
pub fn reverse_commission_for_payment<R>(
    repo: &R,
    payment: &Payment,
) -> ServiceResult<Option<CommissionEntry>>
where
    R: CommissionReader + CommissionWriter + ?Sized,
{
    let Some(original) = repo.find_commission_for_payment(payment.id)? else {
        return Ok(None);
    };

    let entry = NewCommissionEntry {
        establishment_id: original.establishment_id,
        professional_id: original.professional_id,
        payment_id: payment.id,
        rate_bps: original.rate_bps,
        amount_cents: -original.amount_cents,
    };

    Ok(Some(repo.create_commission_entry(&entry)?))
}

/// Commission statement for a professional over a date range.
/// Professionals may query their own statement; everything else requires
/// the admin role.
pub fn commission_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    professional_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> ServiceResult<CommissionReport>
where
    R: CommissionReader + ProfessionalReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let professional = repo
        .get_professional_by_id(professional_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) && professional.email != user.email {
        return Err(ServiceError::Unauthorized);
    }

    let entries = repo.list_commission_entries(
        professional_id,
        day_start(from),
        day_start(to) + chrono::Duration::days(1),
    )?;
    let total_cents = entries.iter().map(|e| e.amount_cents).sum();

    Ok(CommissionReport {
        professional_id,
        from,
        to,
        total_cents,
        entries,
    })
}

fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(0, 0, 0).unwrap_or_default()
}
