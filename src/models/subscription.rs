use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subscription::{
    NewSubscription as DomainNewSubscription, NewSubscriptionPlan as DomainNewSubscriptionPlan,
    Subscription as DomainSubscription, SubscriptionPlan as DomainSubscriptionPlan,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::subscription_plans)]
pub struct SubscriptionPlan {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subscription_plans)]
pub struct NewSubscriptionPlan<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub price_cents: i64,
    pub billing_cycle: String,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct Subscription {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: i32,
    pub plan_id: i32,
    pub provider_ref: Option<String>,
    pub status: String,
    pub started_at: NaiveDateTime,
    pub canceled_at: Option<NaiveDateTime>,
    pub current_period_end: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct NewSubscription {
    pub establishment_id: i32,
    pub client_id: i32,
    pub plan_id: i32,
    pub started_at: NaiveDateTime,
}

impl From<SubscriptionPlan> for DomainSubscriptionPlan {
    fn from(plan: SubscriptionPlan) -> Self {
        Self {
            id: plan.id,
            establishment_id: plan.establishment_id,
            name: plan.name,
            price_cents: plan.price_cents,
            billing_cycle: plan.billing_cycle.into(),
            active: plan.active,
            created_at: plan.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewSubscriptionPlan> for NewSubscriptionPlan<'a> {
    fn from(plan: &'a DomainNewSubscriptionPlan) -> Self {
        Self {
            establishment_id: plan.establishment_id,
            name: plan.name.as_str(),
            price_cents: plan.price_cents,
            billing_cycle: plan.billing_cycle.to_string(),
        }
    }
}

impl From<Subscription> for DomainSubscription {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            establishment_id: subscription.establishment_id,
            client_id: subscription.client_id,
            plan_id: subscription.plan_id,
            provider_ref: subscription.provider_ref,
            status: subscription.status.into(),
            started_at: subscription.started_at,
            canceled_at: subscription.canceled_at,
            current_period_end: subscription.current_period_end,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}

impl From<&DomainNewSubscription> for NewSubscription {
    fn from(subscription: &DomainNewSubscription) -> Self {
        Self {
            establishment_id: subscription.establishment_id,
            client_id: subscription.client_id,
            plan_id: subscription.plan_id,
            started_at: subscription.started_at,
        }
    }
}
