use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Counter payment recorded by staff; settles immediately.
pub struct ManualPaymentForm {
    pub client_id: Option<i32>,
    pub appointment_id: Option<i32>,
    #[validate(length(min = 1))]
    pub method: String,
    #[validate(range(min = 1))]
    pub amount_cents: i64,
}

#[derive(Deserialize)]
pub struct CommissionReportQuery {
    pub professional_id: i32,
    pub from: chrono::NaiveDate,
    pub to: chrono::NaiveDate,
}
