use diesel::prelude::*;

use crate::domain::service::{NewService, Service, UpdateService};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ServiceReader, ServiceWriter};

impl ServiceReader for DieselRepository {
    fn get_service_by_id(
        &self,
        service_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Service>> {
        use crate::models::service::Service as DbService;
        use crate::schema::services;

        let mut conn = self.conn()?;
        let service = services::table
            .find(service_id)
            .filter(services::establishment_id.eq(establishment_id))
            .first::<DbService>(&mut conn)
            .optional()?;

        Ok(service.map(Into::into))
    }

    fn list_services(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<Service>> {
        use crate::models::service::Service as DbService;
        use crate::schema::services;

        let mut conn = self.conn()?;
        let mut q = services::table
            .filter(services::establishment_id.eq(establishment_id))
            .into_boxed();
        if only_active {
            q = q.filter(services::active.eq(true));
        }

        let items = q
            .order(services::name.asc())
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        use crate::models::service::{NewService as DbNewService, Service as DbService};
        use crate::schema::services;

        let mut conn = self.conn()?;
        let insertable: DbNewService = new_service.into();
        let created = diesel::insert_into(services::table)
            .values(&insertable)
            .get_result::<DbService>(&mut conn)?;

        Ok(created.into())
    }

    fn update_service(
        &self,
        service_id: i32,
        establishment_id: i32,
        updates: &UpdateService,
    ) -> RepositoryResult<Service> {
        use crate::models::service::{Service as DbService, UpdateService as DbUpdateService};
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateService = updates.into();

        let updated = diesel::update(
            services::table
                .find(service_id)
                .filter(services::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbService>(&mut conn)?;

        Ok(updated.into())
    }
}
