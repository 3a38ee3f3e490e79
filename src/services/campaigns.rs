//! Marketing campaigns: audience selection and sequential WhatsApp
//! dispatch. There is deliberately no rate limiting or retry; a failed
//! send is logged and skipped.

use chrono::{Datelike, Duration, Utc};
use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::campaign::{Campaign, CampaignAudience, CampaignStatus};
use crate::domain::conversation::{MessageDirection, MessageStatus, NewMessage};
use crate::forms::campaigns::SaveCampaignForm;
use crate::integrations::uazapi::UazapiClient;
use crate::repository::{
    CampaignReader, CampaignWriter, ClientListQuery, ClientReader, ConversationWriter,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_campaigns<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Campaign>>
where
    R: CampaignReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_campaigns(user.establishment_id)?)
}

pub fn create_campaign<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveCampaignForm,
) -> ServiceResult<Campaign>
where
    R: CampaignWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    Ok(repo.create_campaign(&form.to_new_campaign(user.establishment_id))?)
}

pub fn update_campaign<R>(
    repo: &R,
    user: &AuthenticatedUser,
    campaign_id: i32,
    form: &SaveCampaignForm,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let campaign = repo
        .get_campaign_by_id(campaign_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if campaign.status != CampaignStatus::Draft {
        return Err(ServiceError::Conflict(format!(
            "cannot edit a {} campaign",
            campaign.status
        )));
    }

    Ok(repo.update_campaign(campaign_id, user.establishment_id, &form.to_update_campaign())?)
}

fn audience_query(establishment_id: i32, audience: CampaignAudience) -> ClientListQuery {
    let query = ClientListQuery::new(establishment_id);
    match audience {
        CampaignAudience::All => query,
        CampaignAudience::BirthdayMonth => query.birthday_month(Utc::now().naive_utc().month()),
        CampaignAudience::Inactive90d => {
            query.inactive_since(Utc::now().naive_utc() - Duration::days(90))
        }
    }
}

/// Resolves the audience and dispatches the campaign one message at a
/// time, recording each delivery on the client's conversation.
pub async fn send_campaign<R>(
    repo: &R,
    user: &AuthenticatedUser,
    uazapi: &UazapiClient,
    campaign_id: i32,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ClientReader + ConversationWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let campaign = repo
        .get_campaign_by_id(campaign_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if campaign.status != CampaignStatus::Draft {
        return Err(ServiceError::Conflict(format!(
            "cannot send a {} campaign",
            campaign.status
        )));
    }

    let (_, clients) = repo.list_clients(audience_query(user.establishment_id, campaign.audience))?;

    repo.set_campaign_status(campaign.id, CampaignStatus::Sending, 0)?;

    let mut sent_count = 0;
    for client in clients {
        let Some(raw_phone) = client.phone else {
            continue;
        };
        let phone = match uazapi.format_phone(&raw_phone) {
            Ok(phone) => phone,
            Err(e) => {
                log::warn!("Skipping client {} with phone {raw_phone:?}: {e}", client.id);
                continue;
            }
        };

        // Campaign sends are not tracked for delivery; one attempt each,
        // failures are logged inside the client and skipped.
        let text = campaign.render_message(&client.name);
        if uazapi.try_send_text(phone.as_str(), &text).await {
            sent_count += 1;
            let now = Utc::now().naive_utc();
            if let Ok(conversation) = repo.upsert_conversation(
                user.establishment_id,
                phone.as_str(),
                Some(client.id),
                now,
            ) {
                let message = NewMessage {
                    conversation_id: conversation.id,
                    direction: MessageDirection::Out,
                    content: text,
                    provider_ref: None,
                    status: MessageStatus::Sent,
                };
                if let Err(e) = repo.create_message(&message) {
                    log::error!("Failed to record campaign message: {e}");
                }
            }
        }
    }

    Ok(repo.set_campaign_status(campaign.id, CampaignStatus::Sent, sent_count)?)
}
