use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::professionals::{AddProfessionalForm, UpdateProfessionalForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::errors::ServiceError;
use crate::services::professionals;

#[derive(Deserialize)]
struct ProfessionalsQueryParams {
    #[serde(default)]
    only_active: bool,
}

#[get("/professionals")]
pub async fn list_professionals(
    params: web::Query<ProfessionalsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = professionals::list_professionals(repo.get_ref(), &user, params.only_active)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/professionals")]
pub async fn add_professional(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<AddProfessionalForm>,
) -> Result<HttpResponse, ServiceError> {
    let professional = professionals::add_professional(
        repo.get_ref(),
        &user,
        &form,
        &config.uazapi.default_country_code,
    )?;
    Ok(HttpResponse::Created().json(professional))
}

#[put("/professionals/{professional_id}")]
pub async fn save_professional(
    professional_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateProfessionalForm>,
) -> Result<HttpResponse, ServiceError> {
    let professional = professionals::update_professional(
        repo.get_ref(),
        &user,
        professional_id.into_inner(),
        &form,
    )?;
    Ok(HttpResponse::Ok().json(professional))
}
