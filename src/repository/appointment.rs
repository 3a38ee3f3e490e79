use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
};

const OPEN_STATUSES: [&str; 2] = ["Scheduled", "Confirmed"];

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(
        &self,
        appointment_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Appointment>> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let appointment = appointments::table
            .find(appointment_id)
            .filter(appointments::establishment_id.eq(establishment_id))
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        Ok(appointment.map(Into::into))
    }

    fn find_appointment(&self, appointment_id: i32) -> RepositoryResult<Option<Appointment>> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let appointment = appointments::table
            .find(appointment_id)
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        Ok(appointment.map(Into::into))
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Appointment>)> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;

        let build = || {
            let mut q = appointments::table
                .filter(appointments::establishment_id.eq(query.establishment_id))
                .into_boxed();

            if let Some(professional_id) = query.professional_id {
                q = q.filter(appointments::professional_id.eq(professional_id));
            }
            if let Some(client_id) = query.client_id {
                q = q.filter(appointments::client_id.eq(client_id));
            }
            if let Some(day) = query.day {
                let day_start = day.and_hms_opt(0, 0, 0).unwrap_or_default();
                let day_end = day_start + chrono::Duration::days(1);
                q = q
                    .filter(appointments::starts_at.ge(day_start))
                    .filter(appointments::starts_at.lt(day_end));
            }
            if let Some(status) = query.status {
                q = q.filter(appointments::status.eq(status.to_string()));
            }

            q
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut q = build().order(appointments::starts_at.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            q = q.limit(per_page).offset((page - 1) * per_page);
        }

        let items = q
            .load::<DbAppointment>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Appointment>>();

        Ok((total as usize, items))
    }

    fn has_appointment_conflict(
        &self,
        professional_id: i32,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        exclude_id: Option<i32>,
    ) -> RepositoryResult<bool> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let mut q = appointments::table
            .filter(appointments::professional_id.eq(professional_id))
            .filter(appointments::status.eq_any(OPEN_STATUSES))
            .filter(appointments::starts_at.lt(ends_at))
            .filter(appointments::ends_at.gt(starts_at))
            .into_boxed();

        if let Some(id) = exclude_id {
            q = q.filter(appointments::id.ne(id));
        }

        let conflicts: i64 = q.count().get_result(&mut conn)?;
        Ok(conflicts > 0)
    }

    fn list_appointments_due_reminder(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> RepositoryResult<Vec<Appointment>> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let items = appointments::table
            .filter(appointments::status.eq_any(OPEN_STATUSES))
            .filter(appointments::reminder_sent_at.is_null())
            .filter(appointments::starts_at.ge(window_start))
            .filter(appointments::starts_at.lt(window_end))
            .order(appointments::starts_at.asc())
            .load::<DbAppointment>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn find_next_open_appointment(
        &self,
        client_id: i32,
        after: NaiveDateTime,
    ) -> RepositoryResult<Option<Appointment>> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let appointment = appointments::table
            .filter(appointments::client_id.eq(client_id))
            .filter(appointments::status.eq_any(OPEN_STATUSES))
            .filter(appointments::starts_at.gt(after))
            .order(appointments::starts_at.asc())
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        Ok(appointment.map(Into::into))
    }
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<Appointment> {
        use crate::models::appointment::{
            Appointment as DbAppointment, NewAppointment as DbNewAppointment,
        };
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let insertable: DbNewAppointment = new_appointment.into();
        let created = diesel::insert_into(appointments::table)
            .values(&insertable)
            .get_result::<DbAppointment>(&mut conn)?;

        Ok(created.into())
    }

    fn reschedule_appointment(
        &self,
        appointment_id: i32,
        establishment_id: i32,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment> {
        use crate::models::appointment::{
            Appointment as DbAppointment, UpdateAppointment as DbUpdateAppointment,
        };
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateAppointment = updates.into();

        let updated = diesel::update(
            appointments::table
                .find(appointment_id)
                .filter(appointments::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbAppointment>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_appointment_status(
        &self,
        appointment_id: i32,
        status: AppointmentStatus,
    ) -> RepositoryResult<Appointment> {
        use crate::models::appointment::Appointment as DbAppointment;
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let updated = diesel::update(appointments::table.find(appointment_id))
            .set((
                appointments::status.eq(status.to_string()),
                appointments::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbAppointment>(&mut conn)?;

        Ok(updated.into())
    }

    fn mark_appointment_reminded(
        &self,
        appointment_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        diesel::update(appointments::table.find(appointment_id))
            .set(appointments::reminder_sent_at.eq(at))
            .execute(&mut conn)?;

        Ok(())
    }
}
