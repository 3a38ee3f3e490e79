use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::conversation::{Conversation, Message, MessageStatus, NewMessage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ConversationReader, ConversationWriter, DieselRepository, Pagination};

impl ConversationReader for DieselRepository {
    fn get_conversation_by_id(
        &self,
        conversation_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Conversation>> {
        use crate::models::conversation::Conversation as DbConversation;
        use crate::schema::conversations;

        let mut conn = self.conn()?;
        let conversation = conversations::table
            .find(conversation_id)
            .filter(conversations::establishment_id.eq(establishment_id))
            .first::<DbConversation>(&mut conn)
            .optional()?;

        Ok(conversation.map(Into::into))
    }

    fn find_conversation_by_phone(
        &self,
        establishment_id: i32,
        phone: &str,
    ) -> RepositoryResult<Option<Conversation>> {
        use crate::models::conversation::Conversation as DbConversation;
        use crate::schema::conversations;

        let mut conn = self.conn()?;
        let conversation = conversations::table
            .filter(conversations::establishment_id.eq(establishment_id))
            .filter(conversations::phone.eq(phone))
            .first::<DbConversation>(&mut conn)
            .optional()?;

        Ok(conversation.map(Into::into))
    }

    fn list_conversations(
        &self,
        establishment_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<Conversation>)> {
        use crate::models::conversation::Conversation as DbConversation;
        use crate::schema::conversations;

        let mut conn = self.conn()?;

        let total: i64 = conversations::table
            .filter(conversations::establishment_id.eq(establishment_id))
            .count()
            .get_result(&mut conn)?;

        let mut q = conversations::table
            .filter(conversations::establishment_id.eq(establishment_id))
            .order(conversations::last_message_at.desc())
            .into_boxed();
        if let Some(pagination) = &pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            q = q.limit(per_page).offset((page - 1) * per_page);
        }

        let items = q
            .load::<DbConversation>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Conversation>>();

        Ok((total as usize, items))
    }

    fn list_messages(&self, conversation_id: i32) -> RepositoryResult<Vec<Message>> {
        use crate::models::conversation::Message as DbMessage;
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let items = messages::table
            .filter(messages::conversation_id.eq(conversation_id))
            .order(messages::created_at.asc())
            .load::<DbMessage>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl ConversationWriter for DieselRepository {
    fn upsert_conversation(
        &self,
        establishment_id: i32,
        phone: &str,
        client_id: Option<i32>,
        last_message_at: NaiveDateTime,
    ) -> RepositoryResult<Conversation> {
        use crate::models::conversation::{
            Conversation as DbConversation, NewConversation as DbNewConversation,
        };
        use crate::schema::conversations;

        let mut conn = self.conn()?;

        let existing = conversations::table
            .filter(conversations::establishment_id.eq(establishment_id))
            .filter(conversations::phone.eq(phone))
            .first::<DbConversation>(&mut conn)
            .optional()?;

        let updated = match existing {
            Some(conversation) => diesel::update(conversations::table.find(conversation.id))
                .set((
                    conversations::last_message_at.eq(last_message_at),
                    conversations::client_id.eq(client_id.or(conversation.client_id)),
                ))
                .get_result::<DbConversation>(&mut conn)?,
            None => {
                let insertable = DbNewConversation {
                    establishment_id,
                    client_id,
                    phone,
                    last_message_at,
                };
                diesel::insert_into(conversations::table)
                    .values(&insertable)
                    .get_result::<DbConversation>(&mut conn)?
            }
        };

        Ok(updated.into())
    }

    fn set_conversation_ai(
        &self,
        conversation_id: i32,
        ai_enabled: bool,
    ) -> RepositoryResult<Conversation> {
        use crate::models::conversation::Conversation as DbConversation;
        use crate::schema::conversations;

        let mut conn = self.conn()?;
        let updated = diesel::update(conversations::table.find(conversation_id))
            .set(conversations::ai_enabled.eq(ai_enabled))
            .get_result::<DbConversation>(&mut conn)?;

        Ok(updated.into())
    }

    fn create_message(&self, new_message: &NewMessage) -> RepositoryResult<Message> {
        use crate::models::conversation::{Message as DbMessage, NewMessage as DbNewMessage};
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let insertable: DbNewMessage = new_message.into();
        let created = diesel::insert_into(messages::table)
            .values(&insertable)
            .get_result::<DbMessage>(&mut conn)?;

        Ok(created.into())
    }

    fn set_message_status_by_provider_ref(
        &self,
        provider_ref: &str,
        status: MessageStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let affected = diesel::update(
            messages::table.filter(messages::provider_ref.eq(provider_ref)),
        )
        .set(messages::status.eq(status.to_string()))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
