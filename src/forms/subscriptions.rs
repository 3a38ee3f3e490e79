use serde::Deserialize;
use validator::Validate;

use crate::domain::subscription::NewSubscriptionPlan;

#[derive(Deserialize, Validate)]
pub struct AddPlanForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub price_cents: i64,
    pub billing_cycle: String,
}

impl AddPlanForm {
    pub fn to_new_plan(&self, establishment_id: i32) -> NewSubscriptionPlan {
        NewSubscriptionPlan {
            establishment_id,
            name: self.name.trim().to_string(),
            price_cents: self.price_cents,
            billing_cycle: self.billing_cycle.as_str().into(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateSubscriptionForm {
    pub client_id: i32,
    pub plan_id: i32,
}
