use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::subscriptions::{AddPlanForm, CreateSubscriptionForm};
use crate::integrations::asaas::AsaasClient;
use crate::repository::DieselRepository;
use crate::services::errors::ServiceError;
use crate::services::subscriptions;

#[derive(Deserialize)]
struct PlansQueryParams {
    #[serde(default)]
    only_active: bool,
}

#[derive(Deserialize)]
struct PlanActiveForm {
    active: bool,
}

#[get("/subscription-plans")]
pub async fn list_plans(
    params: web::Query<PlansQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = subscriptions::list_plans(repo.get_ref(), &user, params.only_active)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/subscription-plans")]
pub async fn add_plan(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddPlanForm>,
) -> Result<HttpResponse, ServiceError> {
    let plan = subscriptions::add_plan(repo.get_ref(), &user, &form)?;
    Ok(HttpResponse::Created().json(plan))
}

#[put("/subscription-plans/{plan_id}/active")]
pub async fn set_plan_active(
    plan_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PlanActiveForm>,
) -> Result<HttpResponse, ServiceError> {
    let plan =
        subscriptions::set_plan_active(repo.get_ref(), &user, plan_id.into_inner(), form.active)?;
    Ok(HttpResponse::Ok().json(plan))
}

#[get("/subscriptions")]
pub async fn list_subscriptions(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = subscriptions::list_subscriptions(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/subscriptions")]
pub async fn add_subscription(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    asaas: web::Data<AsaasClient>,
    web::Json(form): web::Json<CreateSubscriptionForm>,
) -> Result<HttpResponse, ServiceError> {
    let subscription =
        subscriptions::create_subscription(repo.get_ref(), &user, asaas.get_ref(), &form).await?;
    Ok(HttpResponse::Created().json(subscription))
}

#[delete("/subscriptions/{subscription_id}")]
pub async fn cancel_subscription(
    subscription_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    asaas: web::Data<AsaasClient>,
) -> Result<HttpResponse, ServiceError> {
    let subscription = subscriptions::cancel_subscription(
        repo.get_ref(),
        &user,
        asaas.get_ref(),
        subscription_id.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(subscription))
}
