//! Subscription plans and client subscriptions. Remote provisioning in
//! the payment gateway is best-effort: the local row is the source of
//! truth and webhook events reconcile the rest.

use chrono::Utc;
use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::subscription::{
    NewSubscription, Subscription, SubscriptionPlan, SubscriptionStatus,
};
use crate::forms::subscriptions::{AddPlanForm, CreateSubscriptionForm};
use crate::integrations::asaas::AsaasClient;
use crate::repository::{ClientReader, SubscriptionReader, SubscriptionWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_plans<R>(
    repo: &R,
    user: &AuthenticatedUser,
    only_active: bool,
) -> ServiceResult<Vec<SubscriptionPlan>>
where
    R: SubscriptionReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_plans(user.establishment_id, only_active)?)
}

pub fn add_plan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddPlanForm,
) -> ServiceResult<SubscriptionPlan>
where
    R: SubscriptionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    Ok(repo.create_plan(&form.to_new_plan(user.establishment_id))?)
}

pub fn set_plan_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    plan_id: i32,
    active: bool,
) -> ServiceResult<SubscriptionPlan>
where
    R: SubscriptionReader + SubscriptionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_plan_by_id(plan_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.set_plan_active(plan_id, user.establishment_id, active)?)
}

pub fn list_subscriptions<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Subscription>>
where
    R: SubscriptionReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_subscriptions(user.establishment_id)?)
}

/// Creates a subscription locally, then provisions it in the gateway when
/// an API key is configured. Provisioning failures are logged; the
/// subscription stays `Pending` until webhook events settle it.
pub async fn create_subscription<R>(
    repo: &R,
    user: &AuthenticatedUser,
    asaas: &AsaasClient,
    form: &CreateSubscriptionForm,
) -> ServiceResult<Subscription>
where
    R: ClientReader + SubscriptionReader + SubscriptionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let plan = repo
        .get_plan_by_id(form.plan_id, user.establishment_id)?
        .filter(|p| p.active)
        .ok_or_else(|| ServiceError::Validation("unknown or inactive plan".to_string()))?;

    let client = repo
        .get_client_by_id(form.client_id, user.establishment_id)?
        .ok_or_else(|| ServiceError::Validation("unknown client".to_string()))?;

    let subscription = repo.create_subscription(&NewSubscription {
        establishment_id: user.establishment_id,
        client_id: client.id,
        plan_id: plan.id,
        started_at: Utc::now().naive_utc(),
    })?;

    if !asaas.is_configured() {
        return Ok(subscription);
    }

    let provisioned = async {
        let customer_id = asaas
            .create_customer(&client.name, client.email.as_deref(), client.phone.as_deref())
            .await?;
        asaas
            .create_subscription(
                &customer_id,
                plan.price_cents,
                plan.billing_cycle,
                &plan.name,
                &format!("sub:{}", subscription.id),
            )
            .await
    }
    .await;

    match provisioned {
        Ok(provider_ref) => Ok(repo.set_subscription_provider_ref(subscription.id, &provider_ref)?),
        Err(e) => {
            log::error!(
                "Failed to provision subscription {} in gateway: {e}",
                subscription.id
            );
            Ok(subscription)
        }
    }
}

/// Cancels locally and, best-effort, in the gateway.
pub async fn cancel_subscription<R>(
    repo: &R,
    user: &AuthenticatedUser,
    asaas: &AsaasClient,
    subscription_id: i32,
) -> ServiceResult<Subscription>
where
    R: SubscriptionReader + SubscriptionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let subscription = repo
        .get_subscription_by_id(subscription_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if subscription.status == SubscriptionStatus::Canceled {
        return Err(ServiceError::Conflict(
            "subscription is already canceled".to_string(),
        ));
    }

    let canceled = repo.set_subscription_status(
        subscription.id,
        SubscriptionStatus::Canceled,
        subscription.current_period_end,
        Some(Utc::now().naive_utc()),
    )?;

    if let Some(provider_ref) = canceled.provider_ref.as_deref() {
        if asaas.is_configured() {
            if let Err(e) = asaas.cancel_subscription(provider_ref).await {
                log::error!("Failed to cancel subscription {provider_ref} in gateway: {e}");
            }
        }
    }

    Ok(canceled)
}
