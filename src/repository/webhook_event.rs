use diesel::prelude::*;

use crate::domain::webhook_event::{NewWebhookEvent, WebhookEvent, WebhookStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, WebhookEventReader, WebhookEventWriter};

impl WebhookEventReader for DieselRepository {
    fn list_webhook_events(&self, limit: i64) -> RepositoryResult<Vec<WebhookEvent>> {
        use crate::models::webhook_event::WebhookEvent as DbWebhookEvent;
        use crate::schema::webhook_events;

        let mut conn = self.conn()?;
        let items = webhook_events::table
            .order(webhook_events::received_at.desc())
            .limit(limit)
            .load::<DbWebhookEvent>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl WebhookEventWriter for DieselRepository {
    fn create_webhook_event(&self, event: &NewWebhookEvent) -> RepositoryResult<WebhookEvent> {
        use crate::models::webhook_event::{
            NewWebhookEvent as DbNewWebhookEvent, WebhookEvent as DbWebhookEvent,
        };
        use crate::schema::webhook_events;

        let mut conn = self.conn()?;
        let insertable: DbNewWebhookEvent = event.into();
        let created = diesel::insert_into(webhook_events::table)
            .values(&insertable)
            .get_result::<DbWebhookEvent>(&mut conn)?;

        Ok(created.into())
    }

    fn mark_webhook_event(
        &self,
        event_id: i32,
        status: WebhookStatus,
        error: Option<&str>,
    ) -> RepositoryResult<()> {
        use crate::schema::webhook_events;

        let mut conn = self.conn()?;
        diesel::update(webhook_events::table.find(event_id))
            .set((
                webhook_events::status.eq(status.to_string()),
                webhook_events::error.eq(error),
                webhook_events::processed_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
