use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CreateAppointmentForm {
    pub client_id: i32,
    pub professional_id: i32,
    pub service_id: i32,
    pub starts_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct RescheduleAppointmentForm {
    pub professional_id: i32,
    pub starts_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
/// Target state for the status transition endpoint.
pub struct TransitionAppointmentForm {
    pub status: String,
}
