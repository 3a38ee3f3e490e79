use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::conversation::{
    Conversation, Message, MessageDirection, MessageStatus, NewMessage,
};
use crate::forms::conversations::SendMessageForm;
use crate::integrations::uazapi::UazapiClient;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ConversationReader, ConversationWriter, Pagination};
use crate::services::{ServiceError, ServiceResult};
use crate::SERVICE_ACCESS_ROLE;

#[derive(Debug, Serialize)]
pub struct ConversationsPageData {
    pub total: usize,
    pub conversations: Paginated<Conversation>,
}

#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

pub fn list_conversations<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<ConversationsPageData>
where
    R: ConversationReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = page.unwrap_or(1);
    let (total, conversations) = repo.list_conversations(
        user.establishment_id,
        Some(Pagination {
            page,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }),
    )?;
    let conversations = Paginated::new(conversations, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(ConversationsPageData {
        total,
        conversations,
    })
}

pub fn get_conversation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    conversation_id: i32,
) -> ServiceResult<ConversationDetail>
where
    R: ConversationReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let conversation = repo
        .get_conversation_by_id(conversation_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;
    let messages = repo.list_messages(conversation.id)?;

    Ok(ConversationDetail {
        conversation,
        messages,
    })
}

/// Manual outbound message from a staff member; unlike campaign sends,
/// provider failures surface to the caller.
pub async fn send_message<R>(
    repo: &R,
    user: &AuthenticatedUser,
    uazapi: &UazapiClient,
    conversation_id: i32,
    form: &SendMessageForm,
) -> ServiceResult<Message>
where
    R: ConversationReader + ConversationWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let conversation = repo
        .get_conversation_by_id(conversation_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    let phone = uazapi.format_phone(&conversation.phone)?;
    let provider_ref = uazapi.send_text(&phone, &form.text).await?;

    repo.upsert_conversation(
        user.establishment_id,
        &conversation.phone,
        conversation.client_id,
        Utc::now().naive_utc(),
    )?;

    let message = NewMessage {
        conversation_id: conversation.id,
        direction: MessageDirection::Out,
        content: form.text.clone(),
        provider_ref,
        status: MessageStatus::Sent,
    };

    Ok(repo.create_message(&message)?)
}

/// Toggles the conversational-AI flag; disabling it hands the thread to a
/// human agent.
pub fn set_conversation_ai<R>(
    repo: &R,
    user: &AuthenticatedUser,
    conversation_id: i32,
    ai_enabled: bool,
) -> ServiceResult<Conversation>
where
    R: ConversationReader + ConversationWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_conversation_by_id(conversation_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.set_conversation_ai(conversation_id, ai_enabled)?)
}
