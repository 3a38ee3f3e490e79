//! Reconciliation of WhatsApp provider events: inbound messages,
//! delivery receipts, and instance connection changes.

use chrono::Utc;
use serde::Deserialize;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::conversation::{MessageDirection, MessageStatus, NewMessage};
use crate::domain::types::PhoneNumber;
use crate::domain::webhook_event::WebhookStatus;
use crate::repository::{
    AppointmentReader, AppointmentWriter, ClientReader, ConversationWriter,
};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Deserialize)]
pub struct UazapiEvent {
    pub event: String,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub message: Option<UazapiMessage>,
    #[serde(default)]
    pub update: Option<UazapiMessageUpdate>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UazapiMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub sender: String,
    #[serde(default, rename = "fromMe")]
    pub from_me: bool,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UazapiMessageUpdate {
    pub id: String,
    pub status: String,
}

fn receipt_status(provider_status: &str) -> Option<MessageStatus> {
    match provider_status.to_ascii_lowercase().as_str() {
        "sent" => Some(MessageStatus::Sent),
        "delivered" => Some(MessageStatus::Delivered),
        "read" | "played" => Some(MessageStatus::Read),
        "failed" | "error" => Some(MessageStatus::Failed),
        _ => None,
    }
}

/// True when the inbound text confirms the pending appointment.
fn is_confirmation(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "1" | "sim" | "confirmar" | "confirmo"
    )
}

/// True when the inbound text asks to cancel the pending appointment.
fn is_cancellation(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "2" | "cancelar" | "não" | "nao")
}

/// Applies one provider event for the configured WhatsApp instance's
/// establishment.
pub fn apply_uazapi_event<R>(
    repo: &R,
    raw: &str,
    establishment_id: i32,
    default_country_code: &str,
) -> ServiceResult<WebhookStatus>
where
    R: ClientReader + ConversationWriter + AppointmentReader + AppointmentWriter + ?Sized,
{
    let event: UazapiEvent = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Validation(format!("invalid UAZAPI payload: {e}")))?;

    match event.event.as_str() {
        "messages" => {
            let Some(message) = event.message else {
                return Ok(WebhookStatus::Ignored);
            };
            if message.from_me {
                return Ok(WebhookStatus::Ignored);
            }
            apply_inbound_message(repo, &message, establishment_id, default_country_code)
        }
        "messages_update" => {
            let Some(update) = event.update else {
                return Ok(WebhookStatus::Ignored);
            };
            let Some(status) = receipt_status(&update.status) else {
                return Ok(WebhookStatus::Ignored);
            };
            let affected = repo.set_message_status_by_provider_ref(&update.id, status)?;
            if affected == 0 {
                Ok(WebhookStatus::Ignored)
            } else {
                Ok(WebhookStatus::Processed)
            }
        }
        "connection" => {
            log::info!(
                "WhatsApp instance {} connection state: {}",
                event.instance.as_deref().unwrap_or("unknown"),
                event.status.as_deref().unwrap_or("unknown"),
            );
            Ok(WebhookStatus::Processed)
        }
        _ => Ok(WebhookStatus::Ignored),
    }
}

fn apply_inbound_message<R>(
    repo: &R,
    message: &UazapiMessage,
    establishment_id: i32,
    default_country_code: &str,
) -> ServiceResult<WebhookStatus>
where
    R: ClientReader + ConversationWriter + AppointmentReader + AppointmentWriter + ?Sized,
{
    let phone = PhoneNumber::from_provider(&message.sender, default_country_code)?;
    let now = Utc::now().naive_utc();

    let client = repo.get_client_by_phone(phone.as_str(), establishment_id)?;
    let conversation = repo.upsert_conversation(
        establishment_id,
        phone.as_str(),
        client.as_ref().map(|c| c.id),
        now,
    )?;

    let text = message.text.clone().unwrap_or_default();
    repo.create_message(&NewMessage {
        conversation_id: conversation.id,
        direction: MessageDirection::In,
        content: text.clone(),
        provider_ref: message.id.clone(),
        status: MessageStatus::Delivered,
    })?;

    // Agent commands toggle the conversational-AI handoff flag.
    match text.trim().to_lowercase().as_str() {
        "#pausar" => {
            repo.set_conversation_ai(conversation.id, false)?;
            return Ok(WebhookStatus::Processed);
        }
        "#retomar" => {
            repo.set_conversation_ai(conversation.id, true)?;
            return Ok(WebhookStatus::Processed);
        }
        _ => {}
    }

    // Reply keywords reconcile the client's next open appointment.
    if let Some(client) = client {
        if is_confirmation(&text) || is_cancellation(&text) {
            if let Some(appointment) = repo.find_next_open_appointment(client.id, now)? {
                let next = if is_confirmation(&text) {
                    AppointmentStatus::Confirmed
                } else {
                    AppointmentStatus::Canceled
                };
                if appointment.status.can_transition_to(next) {
                    repo.set_appointment_status(appointment.id, next)?;
                }
            }
        }
    }

    Ok(WebhookStatus::Processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_and_cancellation_keywords() {
        assert!(is_confirmation("1"));
        assert!(is_confirmation(" Sim "));
        assert!(is_confirmation("CONFIRMAR"));
        assert!(!is_confirmation("talvez"));

        assert!(is_cancellation("2"));
        assert!(is_cancellation("Cancelar"));
        assert!(is_cancellation("não"));
        assert!(!is_cancellation("sim"));
    }

    #[test]
    fn receipt_status_mapping() {
        assert_eq!(receipt_status("delivered"), Some(MessageStatus::Delivered));
        assert_eq!(receipt_status("READ"), Some(MessageStatus::Read));
        assert_eq!(receipt_status("played"), Some(MessageStatus::Read));
        assert_eq!(receipt_status("failed"), Some(MessageStatus::Failed));
        assert_eq!(receipt_status("typing"), None);
    }
}
