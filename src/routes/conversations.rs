use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::conversations::{AiToggleForm, SendMessageForm};
use crate::integrations::uazapi::UazapiClient;
use crate::repository::DieselRepository;
use crate::services::conversations;
use crate::services::errors::ServiceError;

#[derive(Deserialize)]
struct ConversationsQueryParams {
    page: Option<usize>,
}

#[get("/conversations")]
pub async fn list_conversations(
    params: web::Query<ConversationsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = conversations::list_conversations(repo.get_ref(), &user, params.page)?;
    Ok(HttpResponse::Ok().json(data))
}

#[get("/conversations/{conversation_id}")]
pub async fn get_conversation(
    conversation_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data =
        conversations::get_conversation(repo.get_ref(), &user, conversation_id.into_inner())?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/conversations/{conversation_id}/messages")]
pub async fn send_message(
    conversation_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uazapi: web::Data<UazapiClient>,
    web::Json(form): web::Json<SendMessageForm>,
) -> Result<HttpResponse, ServiceError> {
    let message = conversations::send_message(
        repo.get_ref(),
        &user,
        uazapi.get_ref(),
        conversation_id.into_inner(),
        &form,
    )
    .await?;
    Ok(HttpResponse::Created().json(message))
}

#[post("/conversations/{conversation_id}/ai")]
pub async fn set_conversation_ai(
    conversation_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AiToggleForm>,
) -> Result<HttpResponse, ServiceError> {
    let conversation = conversations::set_conversation_ai(
        repo.get_ref(),
        &user,
        conversation_id.into_inner(),
        form.ai_enabled,
    )?;
    Ok(HttpResponse::Ok().json(conversation))
}
