//! Appointment scheduling: conflict checks, the status state machine, and
//! the WhatsApp booking confirmation.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use validator::Validate;

use crate::auth::{AuthenticatedUser, check_role, ensure_role};
use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::conversation::{MessageDirection, MessageStatus, NewMessage};
use crate::forms::appointments::{CreateAppointmentForm, RescheduleAppointmentForm};
use crate::integrations::uazapi::UazapiClient;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientReader, ConversationWriter,
    ProfessionalReader, ServiceReader,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_PRO_ROLE};

#[derive(Debug, Default)]
pub struct AppointmentsQuery {
    pub professional_id: Option<i32>,
    pub client_id: Option<i32>,
    pub day: Option<NaiveDate>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentsPageData {
    pub total: usize,
    pub appointments: Paginated<Appointment>,
}

/// Lists appointments; professionals without the admin role only see
/// their own calendar.
pub fn list_appointments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: AppointmentsQuery,
) -> ServiceResult<AppointmentsPageData>
where
    R: AppointmentReader + ProfessionalReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = params.page.unwrap_or(1);
    let mut query =
        AppointmentListQuery::new(user.establishment_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if check_role(SERVICE_PRO_ROLE, &user.roles) && !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        match repo.get_professional_by_email(&user.email, user.establishment_id)? {
            Some(professional) => query = query.professional(professional.id),
            None => {
                return Ok(AppointmentsPageData {
                    total: 0,
                    appointments: Paginated::new(vec![], page, 0),
                });
            }
        }
    } else if let Some(professional_id) = params.professional_id {
        query = query.professional(professional_id);
    }

    if let Some(client_id) = params.client_id {
        query = query.client(client_id);
    }
    if let Some(day) = params.day {
        query = query.day(day);
    }
    if let Some(status) = params.status.as_deref() {
        query = query.status(status.into());
    }

    let (total, appointments) = repo.list_appointments(query)?;
    let appointments = Paginated::new(appointments, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(AppointmentsPageData {
        total,
        appointments,
    })
}

pub fn get_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_appointment_by_id(appointment_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)
}

/// Books a slot. The window is derived from the service duration and the
/// professional's calendar must be free for the whole of it.
pub fn create_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &CreateAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ClientReader + ProfessionalReader + ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let service = repo
        .get_service_by_id(form.service_id, user.establishment_id)?
        .filter(|s| s.active)
        .ok_or_else(|| ServiceError::Validation("unknown or inactive service".to_string()))?;

    repo.get_client_by_id(form.client_id, user.establishment_id)?
        .ok_or_else(|| ServiceError::Validation("unknown client".to_string()))?;

    let professional = repo
        .get_professional_by_id(form.professional_id, user.establishment_id)?
        .filter(|p| p.active)
        .ok_or_else(|| ServiceError::Validation("unknown or inactive professional".to_string()))?;

    let ends_at = form.starts_at + Duration::minutes(i64::from(service.duration_min));

    if repo.has_appointment_conflict(professional.id, form.starts_at, ends_at, None)? {
        return Err(ServiceError::Conflict(
            "professional already booked in this window".to_string(),
        ));
    }

    let new_appointment = NewAppointment {
        establishment_id: user.establishment_id,
        client_id: form.client_id,
        professional_id: form.professional_id,
        service_id: form.service_id,
        starts_at: form.starts_at,
        ends_at,
        notes: form
            .notes
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    Ok(repo.create_appointment(&new_appointment)?)
}

/// Moves an open appointment to a new window or professional.
pub fn reschedule_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: &RescheduleAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ProfessionalReader + ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let appointment = repo
        .get_appointment_by_id(appointment_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if !appointment.status.is_open() {
        return Err(ServiceError::Conflict(format!(
            "cannot reschedule a {} appointment",
            appointment.status
        )));
    }

    repo.get_professional_by_id(form.professional_id, user.establishment_id)?
        .filter(|p| p.active)
        .ok_or_else(|| ServiceError::Validation("unknown or inactive professional".to_string()))?;

    let service = repo
        .get_service_by_id(appointment.service_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;
    let ends_at = form.starts_at + Duration::minutes(i64::from(service.duration_min));

    if repo.has_appointment_conflict(
        form.professional_id,
        form.starts_at,
        ends_at,
        Some(appointment.id),
    )? {
        return Err(ServiceError::Conflict(
            "professional already booked in this window".to_string(),
        ));
    }

    let updates = UpdateAppointment {
        professional_id: form.professional_id,
        starts_at: form.starts_at,
        ends_at,
        notes: form
            .notes
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    Ok(repo.reschedule_appointment(appointment_id, user.establishment_id, &updates)?)
}

/// Applies a lifecycle transition, rejecting moves the state machine does
/// not allow.
pub fn transition_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    next_status: &str,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let appointment = repo
        .get_appointment_by_id(appointment_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    let next = AppointmentStatus::from(next_status);
    if !appointment.status.can_transition_to(next) {
        return Err(ServiceError::Conflict(format!(
            "cannot transition from {} to {}",
            appointment.status, next
        )));
    }

    Ok(repo.set_appointment_status(appointment_id, next)?)
}

/// Which appointment notification to compose.
enum AppointmentMessage {
    Confirmation,
    Reminder,
}

/// Sends a WhatsApp notification for the appointment and records it on
/// the client's conversation. Single attempt: failures are logged and
/// reported as `false`.
async fn deliver_appointment_message<R>(
    repo: &R,
    uazapi: &UazapiClient,
    appointment: &Appointment,
    kind: AppointmentMessage,
) -> bool
where
    R: ClientReader + ServiceReader + ConversationWriter + ?Sized,
{
    let client = match repo.get_client_by_id(appointment.client_id, appointment.establishment_id) {
        Ok(Some(client)) => client,
        Ok(None) => return false,
        Err(e) => {
            log::error!("Failed to load client for appointment notification: {e}");
            return false;
        }
    };

    let Some(raw_phone) = client.phone else {
        return false;
    };
    let phone = match uazapi.format_phone(&raw_phone) {
        Ok(phone) => phone,
        Err(e) => {
            log::warn!("Client {} has unusable phone {raw_phone:?}: {e}", client.id);
            return false;
        }
    };

    let service_name = repo
        .get_service_by_id(appointment.service_id, appointment.establishment_id)
        .ok()
        .flatten()
        .map(|s| s.name)
        .unwrap_or_else(|| "atendimento".to_string());
    let when = appointment.starts_at.format("%d/%m às %H:%M");

    let text = match kind {
        AppointmentMessage::Confirmation => format!(
            "Olá {}! Seu horário de {} está marcado para {}. Responda 1 para confirmar ou 2 para cancelar.",
            client.name, service_name, when,
        ),
        AppointmentMessage::Reminder => format!(
            "Olá {}! Lembrete: seu horário de {} é amanhã, {}. Responda 1 para confirmar ou 2 para cancelar.",
            client.name, service_name, when,
        ),
    };

    match uazapi.send_text(&phone, &text).await {
        Ok(provider_ref) => {
            let now = Utc::now().naive_utc();
            match repo.upsert_conversation(
                appointment.establishment_id,
                phone.as_str(),
                Some(client.id),
                now,
            ) {
                Ok(conversation) => {
                    let message = NewMessage {
                        conversation_id: conversation.id,
                        direction: MessageDirection::Out,
                        content: text,
                        provider_ref,
                        status: MessageStatus::Sent,
                    };
                    if let Err(e) = repo.create_message(&message) {
                        log::error!("Failed to record appointment message: {e}");
                    }
                }
                Err(e) => log::error!("Failed to upsert conversation: {e}"),
            }
            true
        }
        Err(e) => {
            log::error!("Failed to send appointment message to {phone}: {e}");
            false
        }
    }
}

/// Fire-and-forget WhatsApp confirmation sent after a booking. Failures
/// are logged, never surfaced to the booking request.
pub async fn send_booking_confirmation<R>(
    repo: &R,
    uazapi: &UazapiClient,
    appointment: &Appointment,
) where
    R: ClientReader + ServiceReader + ConversationWriter + ?Sized,
{
    deliver_appointment_message(repo, uazapi, appointment, AppointmentMessage::Confirmation).await;
}

/// Next-day reminder used by the `send_reminders` binary. Returns whether
/// the message went out so the caller can stamp `reminder_sent_at`.
pub async fn send_appointment_reminder<R>(
    repo: &R,
    uazapi: &UazapiClient,
    appointment: &Appointment,
) -> bool
where
    R: ClientReader + ServiceReader + ConversationWriter + ?Sized,
{
    deliver_appointment_message(repo, uazapi, appointment, AppointmentMessage::Reminder).await
}
