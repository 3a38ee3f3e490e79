use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::clients::{SaveClientForm, UploadClientsForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::clients::{self, ClientsQuery};
use crate::services::errors::ServiceError;

#[derive(Deserialize)]
struct ClientsQueryParams {
    q: Option<String>,
    page: Option<usize>,
    birthday_month: Option<u32>,
    inactive_days: Option<i64>,
}

#[get("/clients")]
pub async fn list_clients(
    params: web::Query<ClientsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let data = clients::list_clients(
        repo.get_ref(),
        &user,
        ClientsQuery {
            search: params.q,
            page: params.page,
            birthday_month: params.birthday_month,
            inactive_days: params.inactive_days,
        },
    )?;
    Ok(HttpResponse::Ok().json(data))
}

#[get("/clients/birthdays")]
pub async fn list_birthday_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = clients::list_birthday_clients(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(data))
}

#[get("/clients/{client_id}")]
pub async fn get_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let client = clients::get_client(repo.get_ref(), &user, client_id.into_inner())?;
    Ok(HttpResponse::Ok().json(client))
}

#[post("/clients")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveClientForm>,
) -> Result<HttpResponse, ServiceError> {
    clients::create_client(
        repo.get_ref(),
        &user,
        &form,
        &config.uazapi.default_country_code,
    )?;
    Ok(HttpResponse::Created().json(json!({ "created": true })))
}

#[put("/clients/{client_id}")]
pub async fn save_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveClientForm>,
) -> Result<HttpResponse, ServiceError> {
    let client = clients::update_client(
        repo.get_ref(),
        &user,
        client_id.into_inner(),
        &form,
        &config.uazapi.default_country_code,
    )?;
    Ok(HttpResponse::Ok().json(client))
}

#[delete("/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    clients::delete_client(repo.get_ref(), &user, client_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/clients/upload")]
pub async fn clients_upload(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadClientsForm>,
) -> Result<HttpResponse, ServiceError> {
    let imported = clients::import_clients(
        repo.get_ref(),
        &user,
        form.csv.file.as_file(),
        &config.uazapi.default_country_code,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "imported": imported })))
}
