use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, NewAppointment as DomainNewAppointment,
    UpdateAppointment as DomainUpdateAppointment,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct Appointment {
    pub id: i32,
    pub establishment_id: i32,
    pub client_id: i32,
    pub professional_id: i32,
    pub service_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
    pub reminder_sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment<'a> {
    pub establishment_id: i32,
    pub client_id: i32,
    pub professional_id: i32,
    pub service_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
pub struct UpdateAppointment<'a> {
    pub professional_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Appointment> for DomainAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            establishment_id: appointment.establishment_id,
            client_id: appointment.client_id,
            professional_id: appointment.professional_id,
            service_id: appointment.service_id,
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
            status: appointment.status.into(),
            notes: appointment.notes,
            reminder_sent_at: appointment.reminder_sent_at,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAppointment> for NewAppointment<'a> {
    fn from(appointment: &'a DomainNewAppointment) -> Self {
        Self {
            establishment_id: appointment.establishment_id,
            client_id: appointment.client_id,
            professional_id: appointment.professional_id,
            service_id: appointment.service_id,
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
            notes: appointment.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateAppointment> for UpdateAppointment<'a> {
    fn from(appointment: &'a DomainUpdateAppointment) -> Self {
        Self {
            professional_id: appointment.professional_id,
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
            notes: appointment.notes.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
