use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Client> for DomainClient {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            establishment_id: client.establishment_id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            birth_date: client.birth_date,
            notes: client.notes,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            establishment_id: client.establishment_id,
            name: client.name.as_str(),
            email: client.email.as_deref(),
            phone: client.phone.as_deref(),
            birth_date: client.birth_date,
            notes: client.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_deref(),
            phone: client.phone.as_deref(),
            birth_date: client.birth_date,
            notes: client.notes.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient::new(
            1,
            "John".to_string(),
            Some("John@Example.com".to_string()),
            Some("+5511999990000".to_string()),
            None,
            None,
        );
        let new: NewClient = (&domain).into();
        assert_eq!(new.establishment_id, 1);
        assert_eq!(new.name, "John");
        assert_eq!(new.email, Some("john@example.com"));
        assert_eq!(new.phone, Some("+5511999990000"));
        assert_eq!(new.notes, None);
    }

    #[test]
    fn client_into_domain() {
        let now = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            establishment_id: 2,
            name: "n".to_string(),
            email: Some("e@example.com".to_string()),
            phone: None,
            birth_date: None,
            notes: Some("vip".to_string()),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainClient = db_client.into();
        assert_eq!(domain.id, 1);
        assert_eq!(domain.establishment_id, 2);
        assert_eq!(domain.notes, Some("vip".to_string()));
    }
}
