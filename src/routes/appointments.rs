use actix_web::{HttpResponse, get, post, put, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::appointments::{
    CreateAppointmentForm, RescheduleAppointmentForm, TransitionAppointmentForm,
};
use crate::integrations::uazapi::UazapiClient;
use crate::repository::DieselRepository;
use crate::services::appointments::{self, AppointmentsQuery};
use crate::services::errors::ServiceError;

#[derive(Deserialize)]
struct AppointmentsQueryParams {
    professional_id: Option<i32>,
    client_id: Option<i32>,
    day: Option<NaiveDate>,
    status: Option<String>,
    page: Option<usize>,
}

#[get("/appointments")]
pub async fn list_appointments(
    params: web::Query<AppointmentsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let data = appointments::list_appointments(
        repo.get_ref(),
        &user,
        AppointmentsQuery {
            professional_id: params.professional_id,
            client_id: params.client_id,
            day: params.day,
            status: params.status,
            page: params.page,
        },
    )?;
    Ok(HttpResponse::Ok().json(data))
}

#[get("/appointments/{appointment_id}")]
pub async fn get_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let appointment =
        appointments::get_appointment(repo.get_ref(), &user, appointment_id.into_inner())?;
    Ok(HttpResponse::Ok().json(appointment))
}

#[post("/appointments")]
pub async fn add_appointment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uazapi: web::Data<UazapiClient>,
    web::Json(form): web::Json<CreateAppointmentForm>,
) -> Result<HttpResponse, ServiceError> {
    let appointment = appointments::create_appointment(repo.get_ref(), &user, &form)?;

    // Confirmation goes out in the background; the booking response does
    // not wait for the messaging provider.
    let repo = repo.get_ref().clone();
    let uazapi = uazapi.get_ref().clone();
    let created = appointment.clone();
    actix_web::rt::spawn(async move {
        appointments::send_booking_confirmation(&repo, &uazapi, &created).await;
    });

    Ok(HttpResponse::Created().json(appointment))
}

#[put("/appointments/{appointment_id}")]
pub async fn reschedule_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RescheduleAppointmentForm>,
) -> Result<HttpResponse, ServiceError> {
    let appointment = appointments::reschedule_appointment(
        repo.get_ref(),
        &user,
        appointment_id.into_inner(),
        &form,
    )?;
    Ok(HttpResponse::Ok().json(appointment))
}

#[post("/appointments/{appointment_id}/status")]
pub async fn transition_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TransitionAppointmentForm>,
) -> Result<HttpResponse, ServiceError> {
    let appointment = appointments::transition_appointment(
        repo.get_ref(),
        &user,
        appointment_id.into_inner(),
        &form.status,
    )?;
    Ok(HttpResponse::Ok().json(appointment))
}
