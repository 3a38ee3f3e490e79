use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::conversation::{
    Conversation as DomainConversation, Message as DomainMessage,
    NewConversation as DomainNewConversation, NewMessage as DomainNewMessage,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::conversations)]
pub struct Conversation {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub phone: String,
    pub ai_enabled: bool,
    pub last_message_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::conversations)]
pub struct NewConversation<'a> {
    pub establishment_id: i32,
    pub client_id: Option<i32>,
    pub phone: &'a str,
    pub last_message_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::messages)]
pub struct Message {
    pub id: i32,
    pub conversation_id: i32,
    pub direction: String,
    pub content: String,
    pub provider_ref: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::messages)]
pub struct NewMessage<'a> {
    pub conversation_id: i32,
    pub direction: String,
    pub content: &'a str,
    pub provider_ref: Option<&'a str>,
    pub status: String,
}

impl From<Conversation> for DomainConversation {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            establishment_id: conversation.establishment_id,
            client_id: conversation.client_id,
            phone: conversation.phone,
            ai_enabled: conversation.ai_enabled,
            last_message_at: conversation.last_message_at,
            created_at: conversation.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewConversation> for NewConversation<'a> {
    fn from(conversation: &'a DomainNewConversation) -> Self {
        Self {
            establishment_id: conversation.establishment_id,
            client_id: conversation.client_id,
            phone: conversation.phone.as_str(),
            last_message_at: conversation.last_message_at,
        }
    }
}

impl From<Message> for DomainMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            direction: message.direction.into(),
            content: message.content,
            provider_ref: message.provider_ref,
            status: message.status.into(),
            created_at: message.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewMessage> for NewMessage<'a> {
    fn from(message: &'a DomainNewMessage) -> Self {
        Self {
            conversation_id: message.conversation_id,
            direction: message.direction.to_string(),
            content: message.content.as_str(),
            provider_ref: message.provider_ref.as_deref(),
            status: message.status.to_string(),
        }
    }
}
