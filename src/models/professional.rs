use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::professional::{
    NewProfessional as DomainNewProfessional, Professional as DomainProfessional,
    UpdateProfessional as DomainUpdateProfessional,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::professionals)]
pub struct Professional {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub commission_bps: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::professionals)]
pub struct NewProfessional<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub commission_bps: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::professionals)]
pub struct UpdateProfessional<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub commission_bps: i32,
    pub active: bool,
}

impl From<Professional> for DomainProfessional {
    fn from(professional: Professional) -> Self {
        Self {
            id: professional.id,
            establishment_id: professional.establishment_id,
            name: professional.name,
            email: professional.email,
            phone: professional.phone,
            commission_bps: professional.commission_bps,
            active: professional.active,
            created_at: professional.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewProfessional> for NewProfessional<'a> {
    fn from(professional: &'a DomainNewProfessional) -> Self {
        Self {
            establishment_id: professional.establishment_id,
            name: professional.name.as_str(),
            email: professional.email.as_str(),
            phone: professional.phone.as_deref(),
            commission_bps: professional.commission_bps,
        }
    }
}

impl<'a> From<&'a DomainUpdateProfessional> for UpdateProfessional<'a> {
    fn from(professional: &'a DomainUpdateProfessional) -> Self {
        Self {
            name: professional.name.as_str(),
            phone: professional.phone.as_deref(),
            commission_bps: professional.commission_bps,
            active: professional.active,
        }
    }
}
