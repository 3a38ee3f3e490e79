use diesel::dsl::{exists, not, sql};
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(
        &self,
        client_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(client_id)
            .filter(clients::establishment_id.eq(establishment_id))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn get_client_by_phone(
        &self,
        phone: &str,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::establishment_id.eq(establishment_id))
            .filter(clients::phone.eq(phone))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::models::client::Client as DbClient;
        use crate::schema::{appointments, clients};

        let mut conn = self.conn()?;

        let build = || {
            let mut q = clients::table
                .filter(clients::establishment_id.eq(query.establishment_id))
                .into_boxed();

            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                q = q.filter(
                    clients::name
                        .like(pattern.clone())
                        .nullable()
                        .or(clients::email.like(pattern.clone()))
                        .or(clients::phone.like(pattern)),
                );
            }

            if let Some(month) = query.birthday_month {
                q = q.filter(sql::<Bool>(&format!(
                    "strftime('%m', birth_date) = '{month:02}'"
                )));
            }

            if let Some(since) = query.inactive_since {
                q = q.filter(not(exists(
                    appointments::table
                        .filter(appointments::client_id.eq(clients::id))
                        .filter(appointments::starts_at.ge(since)),
                )));
            }

            q
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut q = build().order(clients::name.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            q = q.limit(per_page).offset((page - 1) * per_page);
        }

        let items = q
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Client>>();

        Ok((total as usize, items))
    }
}

impl ClientWriter for DieselRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::models::client::NewClient as DbNewClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewClient> = new_clients.iter().map(Into::into).collect();
        let affected = diesel::insert_into(clients::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_client(
        &self,
        client_id: i32,
        establishment_id: i32,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, UpdateClient as DbUpdateClient};
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateClient = updates.into();

        let updated = diesel::update(
            clients::table
                .find(client_id)
                .filter(clients::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbClient>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_client(&self, client_id: i32, establishment_id: i32) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        diesel::delete(
            clients::table
                .find(client_id)
                .filter(clients::establishment_id.eq(establishment_id)),
        )
        .execute(&mut conn)?;
        Ok(())
    }
}
