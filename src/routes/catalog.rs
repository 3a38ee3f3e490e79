use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::catalog::{AddServiceForm, UpdateServiceForm};
use crate::repository::DieselRepository;
use crate::services::catalog;
use crate::services::errors::ServiceError;

#[derive(Deserialize)]
struct ServicesQueryParams {
    #[serde(default)]
    only_active: bool,
}

#[get("/services")]
pub async fn list_services(
    params: web::Query<ServicesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = catalog::list_services(repo.get_ref(), &user, params.only_active)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/services")]
pub async fn add_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddServiceForm>,
) -> Result<HttpResponse, ServiceError> {
    let service = catalog::add_service(repo.get_ref(), &user, &form)?;
    Ok(HttpResponse::Created().json(service))
}

#[put("/services/{service_id}")]
pub async fn save_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateServiceForm>,
) -> Result<HttpResponse, ServiceError> {
    let service = catalog::update_service(repo.get_ref(), &user, service_id.into_inner(), &form)?;
    Ok(HttpResponse::Ok().json(service))
}
