use diesel::prelude::*;

use crate::domain::professional::{NewProfessional, Professional, UpdateProfessional};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProfessionalReader, ProfessionalWriter};

impl ProfessionalReader for DieselRepository {
    fn get_professional_by_id(
        &self,
        professional_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Professional>> {
        use crate::models::professional::Professional as DbProfessional;
        use crate::schema::professionals;

        let mut conn = self.conn()?;
        let professional = professionals::table
            .find(professional_id)
            .filter(professionals::establishment_id.eq(establishment_id))
            .first::<DbProfessional>(&mut conn)
            .optional()?;

        Ok(professional.map(Into::into))
    }

    fn get_professional_by_email(
        &self,
        email: &str,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Professional>> {
        use crate::models::professional::Professional as DbProfessional;
        use crate::schema::professionals;

        let mut conn = self.conn()?;
        let professional = professionals::table
            .filter(professionals::establishment_id.eq(establishment_id))
            .filter(professionals::email.eq(email))
            .first::<DbProfessional>(&mut conn)
            .optional()?;

        Ok(professional.map(Into::into))
    }

    fn list_professionals(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<Professional>> {
        use crate::models::professional::Professional as DbProfessional;
        use crate::schema::professionals;

        let mut conn = self.conn()?;
        let mut q = professionals::table
            .filter(professionals::establishment_id.eq(establishment_id))
            .into_boxed();
        if only_active {
            q = q.filter(professionals::active.eq(true));
        }

        let items = q
            .order(professionals::name.asc())
            .load::<DbProfessional>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl ProfessionalWriter for DieselRepository {
    fn create_professional(
        &self,
        new_professional: &NewProfessional,
    ) -> RepositoryResult<Professional> {
        use crate::models::professional::{
            NewProfessional as DbNewProfessional, Professional as DbProfessional,
        };
        use crate::schema::professionals;

        let mut conn = self.conn()?;
        let insertable: DbNewProfessional = new_professional.into();
        let created = diesel::insert_into(professionals::table)
            .values(&insertable)
            .get_result::<DbProfessional>(&mut conn)?;

        Ok(created.into())
    }

    fn update_professional(
        &self,
        professional_id: i32,
        establishment_id: i32,
        updates: &UpdateProfessional,
    ) -> RepositoryResult<Professional> {
        use crate::models::professional::{
            Professional as DbProfessional, UpdateProfessional as DbUpdateProfessional,
        };
        use crate::schema::professionals;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProfessional = updates.into();

        let updated = diesel::update(
            professionals::table
                .find(professional_id)
                .filter(professionals::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbProfessional>(&mut conn)?;

        Ok(updated.into())
    }
}
