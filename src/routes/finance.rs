use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::finance::{CommissionReportQuery, ManualPaymentForm};
use crate::repository::DieselRepository;
use crate::services::errors::ServiceError;
use crate::services::finance::{self, PaymentsQuery};

#[derive(Deserialize)]
struct PaymentsQueryParams {
    status: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    page: Option<usize>,
}

#[get("/payments")]
pub async fn list_payments(
    params: web::Query<PaymentsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let data = finance::list_payments(
        repo.get_ref(),
        &user,
        PaymentsQuery {
            status: params.status,
            from: params.from,
            to: params.to,
            page: params.page,
        },
    )?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/payments")]
pub async fn add_payment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ManualPaymentForm>,
) -> Result<HttpResponse, ServiceError> {
    let payment = finance::create_manual_payment(repo.get_ref(), &user, &form)?;
    Ok(HttpResponse::Created().json(payment))
}

#[get("/commissions/report")]
pub async fn commission_report(
    params: web::Query<CommissionReportQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let report = finance::commission_report(
        repo.get_ref(),
        &user,
        params.professional_id,
        params.from,
        params.to,
    )?;
    Ok(HttpResponse::Ok().json(report))
}
