use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subscription::{
    NewSubscription, NewSubscriptionPlan, Subscription, SubscriptionPlan, SubscriptionStatus,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SubscriptionReader, SubscriptionWriter};

impl SubscriptionReader for DieselRepository {
    fn get_plan_by_id(
        &self,
        plan_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<SubscriptionPlan>> {
        use crate::models::subscription::SubscriptionPlan as DbSubscriptionPlan;
        use crate::schema::subscription_plans;

        let mut conn = self.conn()?;
        let plan = subscription_plans::table
            .find(plan_id)
            .filter(subscription_plans::establishment_id.eq(establishment_id))
            .first::<DbSubscriptionPlan>(&mut conn)
            .optional()?;

        Ok(plan.map(Into::into))
    }

    fn list_plans(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<SubscriptionPlan>> {
        use crate::models::subscription::SubscriptionPlan as DbSubscriptionPlan;
        use crate::schema::subscription_plans;

        let mut conn = self.conn()?;
        let mut q = subscription_plans::table
            .filter(subscription_plans::establishment_id.eq(establishment_id))
            .into_boxed();
        if only_active {
            q = q.filter(subscription_plans::active.eq(true));
        }

        let items = q
            .order(subscription_plans::name.asc())
            .load::<DbSubscriptionPlan>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn get_subscription_by_id(
        &self,
        subscription_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Subscription>> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let subscription = subscriptions::table
            .find(subscription_id)
            .filter(subscriptions::establishment_id.eq(establishment_id))
            .first::<DbSubscription>(&mut conn)
            .optional()?;

        Ok(subscription.map(Into::into))
    }

    fn get_subscription_by_provider_ref(
        &self,
        provider_ref: &str,
    ) -> RepositoryResult<Option<Subscription>> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let subscription = subscriptions::table
            .filter(subscriptions::provider_ref.eq(provider_ref))
            .first::<DbSubscription>(&mut conn)
            .optional()?;

        Ok(subscription.map(Into::into))
    }

    fn find_subscription(&self, subscription_id: i32) -> RepositoryResult<Option<Subscription>> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let subscription = subscriptions::table
            .find(subscription_id)
            .first::<DbSubscription>(&mut conn)
            .optional()?;

        Ok(subscription.map(Into::into))
    }

    fn list_subscriptions(&self, establishment_id: i32) -> RepositoryResult<Vec<Subscription>> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let items = subscriptions::table
            .filter(subscriptions::establishment_id.eq(establishment_id))
            .order(subscriptions::created_at.desc())
            .load::<DbSubscription>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl SubscriptionWriter for DieselRepository {
    fn create_plan(&self, new_plan: &NewSubscriptionPlan) -> RepositoryResult<SubscriptionPlan> {
        use crate::models::subscription::{
            NewSubscriptionPlan as DbNewSubscriptionPlan, SubscriptionPlan as DbSubscriptionPlan,
        };
        use crate::schema::subscription_plans;

        let mut conn = self.conn()?;
        let insertable: DbNewSubscriptionPlan = new_plan.into();
        let created = diesel::insert_into(subscription_plans::table)
            .values(&insertable)
            .get_result::<DbSubscriptionPlan>(&mut conn)?;

        Ok(created.into())
    }

    fn set_plan_active(
        &self,
        plan_id: i32,
        establishment_id: i32,
        active: bool,
    ) -> RepositoryResult<SubscriptionPlan> {
        use crate::models::subscription::SubscriptionPlan as DbSubscriptionPlan;
        use crate::schema::subscription_plans;

        let mut conn = self.conn()?;
        let updated = diesel::update(
            subscription_plans::table
                .find(plan_id)
                .filter(subscription_plans::establishment_id.eq(establishment_id)),
        )
        .set(subscription_plans::active.eq(active))
        .get_result::<DbSubscriptionPlan>(&mut conn)?;

        Ok(updated.into())
    }

    fn create_subscription(
        &self,
        new_subscription: &NewSubscription,
    ) -> RepositoryResult<Subscription> {
        use crate::models::subscription::{
            NewSubscription as DbNewSubscription, Subscription as DbSubscription,
        };
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let insertable: DbNewSubscription = new_subscription.into();
        let created = diesel::insert_into(subscriptions::table)
            .values(&insertable)
            .get_result::<DbSubscription>(&mut conn)?;

        Ok(created.into())
    }

    fn set_subscription_provider_ref(
        &self,
        subscription_id: i32,
        provider_ref: &str,
    ) -> RepositoryResult<Subscription> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let updated = diesel::update(subscriptions::table.find(subscription_id))
            .set((
                subscriptions::provider_ref.eq(provider_ref),
                subscriptions::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbSubscription>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_subscription_status(
        &self,
        subscription_id: i32,
        status: SubscriptionStatus,
        current_period_end: Option<NaiveDateTime>,
        canceled_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Subscription> {
        use crate::models::subscription::Subscription as DbSubscription;
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let updated = diesel::update(subscriptions::table.find(subscription_id))
            .set((
                subscriptions::status.eq(status.to_string()),
                subscriptions::current_period_end.eq(current_period_end),
                subscriptions::canceled_at.eq(canceled_at),
                subscriptions::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbSubscription>(&mut conn)?;

        Ok(updated.into())
    }
}
