use serde::Deserialize;
use validator::Validate;

use crate::domain::service::{NewService, UpdateService};

#[derive(Deserialize, Validate)]
pub struct AddServiceForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 5, max = 480))]
    pub duration_min: i32,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0, max = 10000))]
    pub commission_bps: Option<i32>,
}

impl AddServiceForm {
    pub fn to_new_service(&self, establishment_id: i32) -> NewService {
        NewService {
            establishment_id,
            name: self.name.trim().to_string(),
            duration_min: self.duration_min,
            price_cents: self.price_cents,
            commission_bps: self.commission_bps,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateServiceForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 5, max = 480))]
    pub duration_min: i32,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0, max = 10000))]
    pub commission_bps: Option<i32>,
    pub active: bool,
}

impl From<&UpdateServiceForm> for UpdateService {
    fn from(form: &UpdateServiceForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            duration_min: form.duration_min,
            price_cents: form.price_cents,
            commission_bps: form.commission_bps,
            active: form.active,
        }
    }
}
