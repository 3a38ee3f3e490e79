use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::campaign::{NewCampaign, UpdateCampaign};

#[derive(Deserialize, Validate)]
pub struct SaveCampaignForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub audience: String,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl SaveCampaignForm {
    pub fn to_new_campaign(&self, establishment_id: i32) -> NewCampaign {
        NewCampaign {
            establishment_id,
            name: self.name.trim().to_string(),
            message: self.message.trim().to_string(),
            audience: self.audience.as_str().into(),
            scheduled_at: self.scheduled_at,
        }
    }

    pub fn to_update_campaign(&self) -> UpdateCampaign {
        UpdateCampaign {
            name: self.name.trim().to_string(),
            message: self.message.trim().to_string(),
            audience: self.audience.as_str().into(),
            scheduled_at: self.scheduled_at,
        }
    }
}
