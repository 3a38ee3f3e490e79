use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign::{
    Campaign as DomainCampaign, NewCampaign as DomainNewCampaign,
    UpdateCampaign as DomainUpdateCampaign,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct Campaign {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub message: String,
    pub audience: String,
    pub status: String,
    pub scheduled_at: Option<NaiveDateTime>,
    pub sent_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaign<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub message: &'a str,
    pub audience: String,
    pub scheduled_at: Option<NaiveDateTime>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct UpdateCampaign<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub audience: String,
    pub scheduled_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl From<Campaign> for DomainCampaign {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            establishment_id: campaign.establishment_id,
            name: campaign.name,
            message: campaign.message,
            audience: campaign.audience.into(),
            status: campaign.status.into(),
            scheduled_at: campaign.scheduled_at,
            sent_count: campaign.sent_count,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCampaign> for NewCampaign<'a> {
    fn from(campaign: &'a DomainNewCampaign) -> Self {
        Self {
            establishment_id: campaign.establishment_id,
            name: campaign.name.as_str(),
            message: campaign.message.as_str(),
            audience: campaign.audience.to_string(),
            scheduled_at: campaign.scheduled_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCampaign> for UpdateCampaign<'a> {
    fn from(campaign: &'a DomainUpdateCampaign) -> Self {
        Self {
            name: campaign.name.as_str(),
            message: campaign.message.as_str(),
            audience: campaign.audience.to_string(),
            scheduled_at: campaign.scheduled_at,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
