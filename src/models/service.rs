use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{
    NewService as DomainNewService, Service as DomainService, UpdateService as DomainUpdateService,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i64,
    pub commission_bps: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub duration_min: i32,
    pub price_cents: i64,
    pub commission_bps: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::services)]
pub struct UpdateService<'a> {
    pub name: &'a str,
    pub duration_min: i32,
    pub price_cents: i64,
    pub commission_bps: Option<i32>,
    pub active: bool,
}

impl From<Service> for DomainService {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            establishment_id: service.establishment_id,
            name: service.name,
            duration_min: service.duration_min,
            price_cents: service.price_cents,
            commission_bps: service.commission_bps,
            active: service.active,
            created_at: service.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewService> for NewService<'a> {
    fn from(service: &'a DomainNewService) -> Self {
        Self {
            establishment_id: service.establishment_id,
            name: service.name.as_str(),
            duration_min: service.duration_min,
            price_cents: service.price_cents,
            commission_bps: service.commission_bps,
        }
    }
}

impl<'a> From<&'a DomainUpdateService> for UpdateService<'a> {
    fn from(service: &'a DomainUpdateService) -> Self {
        Self {
            name: service.name.as_str(),
            duration_min: service.duration_min,
            price_cents: service.price_cents,
            commission_bps: service.commission_bps,
            active: service.active,
        }
    }
}
