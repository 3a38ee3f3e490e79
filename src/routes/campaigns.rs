use actix_web::{HttpResponse, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::campaigns::SaveCampaignForm;
use crate::integrations::uazapi::UazapiClient;
use crate::repository::DieselRepository;
use crate::services::campaigns;
use crate::services::errors::ServiceError;

#[get("/campaigns")]
pub async fn list_campaigns(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = campaigns::list_campaigns(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/campaigns")]
pub async fn add_campaign(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveCampaignForm>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaigns::create_campaign(repo.get_ref(), &user, &form)?;
    Ok(HttpResponse::Created().json(campaign))
}

#[put("/campaigns/{campaign_id}")]
pub async fn save_campaign(
    campaign_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveCampaignForm>,
) -> Result<HttpResponse, ServiceError> {
    let campaign =
        campaigns::update_campaign(repo.get_ref(), &user, campaign_id.into_inner(), &form)?;
    Ok(HttpResponse::Ok().json(campaign))
}

#[post("/campaigns/{campaign_id}/send")]
pub async fn send_campaign(
    campaign_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uazapi: web::Data<UazapiClient>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaigns::send_campaign(
        repo.get_ref(),
        &user,
        uazapi.get_ref(),
        campaign_id.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(campaign))
}
