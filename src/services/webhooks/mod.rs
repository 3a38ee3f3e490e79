//! Webhook event intake shared by the provider-specific handlers.
//!
//! Every delivery is recorded before processing. Processing applies
//! conditional updates only; there is no retry queue, no dead-lettering,
//! and redeliveries simply re-apply the same update.

use crate::domain::webhook_event::{NewWebhookEvent, WebhookEvent, WebhookProvider, WebhookStatus};
use crate::repository::{WebhookEventReader, WebhookEventWriter};
use crate::services::ServiceResult;

pub mod asaas;
pub mod uazapi;

/// Best-effort extraction of the provider's event type for the audit row.
pub fn event_type_of(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| v.get("event").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn record_event<R>(
    repo: &R,
    provider: WebhookProvider,
    raw: &str,
) -> ServiceResult<WebhookEvent>
where
    R: WebhookEventWriter + ?Sized,
{
    let event = NewWebhookEvent {
        provider,
        event_type: event_type_of(raw),
        payload: raw.to_string(),
    };
    Ok(repo.create_webhook_event(&event)?)
}

pub fn finish_event<R>(
    repo: &R,
    event_id: i32,
    status: WebhookStatus,
    error: Option<&str>,
) where
    R: WebhookEventWriter + ?Sized,
{
    if let Err(e) = repo.mark_webhook_event(event_id, status, error) {
        log::error!("Failed to mark webhook event {event_id}: {e}");
    }
}

pub fn list_recent_events<R>(repo: &R, limit: i64) -> ServiceResult<Vec<WebhookEvent>>
where
    R: WebhookEventReader + ?Sized,
{
    Ok(repo.list_webhook_events(limit)?)
}
