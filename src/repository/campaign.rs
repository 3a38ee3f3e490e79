use diesel::prelude::*;

use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign, UpdateCampaign};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CampaignReader, CampaignWriter, DieselRepository};

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(
        &self,
        campaign_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Campaign>> {
        use crate::models::campaign::Campaign as DbCampaign;
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let campaign = campaigns::table
            .find(campaign_id)
            .filter(campaigns::establishment_id.eq(establishment_id))
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        Ok(campaign.map(Into::into))
    }

    fn list_campaigns(&self, establishment_id: i32) -> RepositoryResult<Vec<Campaign>> {
        use crate::models::campaign::Campaign as DbCampaign;
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let items = campaigns::table
            .filter(campaigns::establishment_id.eq(establishment_id))
            .order(campaigns::created_at.desc())
            .load::<DbCampaign>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        use crate::models::campaign::{Campaign as DbCampaign, NewCampaign as DbNewCampaign};
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let insertable: DbNewCampaign = new_campaign.into();
        let created = diesel::insert_into(campaigns::table)
            .values(&insertable)
            .get_result::<DbCampaign>(&mut conn)?;

        Ok(created.into())
    }

    fn update_campaign(
        &self,
        campaign_id: i32,
        establishment_id: i32,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign> {
        use crate::models::campaign::{Campaign as DbCampaign, UpdateCampaign as DbUpdateCampaign};
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCampaign = updates.into();

        let updated = diesel::update(
            campaigns::table
                .find(campaign_id)
                .filter(campaigns::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbCampaign>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_campaign_status(
        &self,
        campaign_id: i32,
        status: CampaignStatus,
        sent_count: i32,
    ) -> RepositoryResult<Campaign> {
        use crate::models::campaign::Campaign as DbCampaign;
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let updated = diesel::update(campaigns::table.find(campaign_id))
            .set((
                campaigns::status.eq(status.to_string()),
                campaigns::sent_count.eq(sent_count),
                campaigns::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbCampaign>(&mut conn)?;

        Ok(updated.into())
    }
}
