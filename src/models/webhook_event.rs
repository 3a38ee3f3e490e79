use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::webhook_event::{
    NewWebhookEvent as DomainNewWebhookEvent, WebhookEvent as DomainWebhookEvent,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::webhook_events)]
pub struct WebhookEvent {
    pub id: i32,
    pub provider: String,
    pub event_type: String,
    pub payload: String,
    pub status: String,
    pub error: Option<String>,
    pub received_at: NaiveDateTime,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::webhook_events)]
pub struct NewWebhookEvent<'a> {
    pub provider: String,
    pub event_type: &'a str,
    pub payload: &'a str,
}

impl From<WebhookEvent> for DomainWebhookEvent {
    fn from(event: WebhookEvent) -> Self {
        Self {
            id: event.id,
            provider: event.provider.into(),
            event_type: event.event_type,
            payload: event.payload,
            status: event.status.into(),
            error: event.error,
            received_at: event.received_at,
            processed_at: event.processed_at,
        }
    }
}

impl<'a> From<&'a DomainNewWebhookEvent> for NewWebhookEvent<'a> {
    fn from(event: &'a DomainNewWebhookEvent) -> Self {
        Self {
            provider: event.provider.to_string(),
            event_type: event.event_type.as_str(),
            payload: event.payload.as_str(),
        }
    }
}
