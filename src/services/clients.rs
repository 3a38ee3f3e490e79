use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::client::{Client, NewClient};
use crate::forms::clients::SaveClientForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Query parameters accepted by the clients list endpoint.
#[derive(Debug, Default)]
pub struct ClientsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    /// Restrict to clients with a birthday in this month (1-12).
    pub birthday_month: Option<u32>,
    /// Restrict to clients without an appointment in the last N days.
    pub inactive_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub total: usize,
    pub clients: Paginated<Client>,
}

/// Returns the filtered client list visible to the authenticated user.
pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = params.page.unwrap_or(1);
    let mut query = ClientListQuery::new(user.establishment_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    if let Some(month) = params.birthday_month {
        if !(1..=12).contains(&month) {
            return Err(ServiceError::Validation(format!(
                "invalid birthday month: {month}"
            )));
        }
        query = query.birthday_month(month);
    }

    if let Some(days) = params.inactive_days {
        query = query.inactive_since(Utc::now().naive_utc() - Duration::days(days));
    }

    let (total, clients) = repo.list_clients(query)?;
    let clients = Paginated::new(clients, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(ClientsPageData { total, clients })
}

/// Convenience filter: clients celebrating a birthday this month.
pub fn list_birthday_clients<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let month = Utc::now().naive_utc().month();
    let (_, clients) =
        repo.list_clients(ClientListQuery::new(user.establishment_id).birthday_month(month))?;

    Ok(clients)
}

pub fn get_client<R>(repo: &R, user: &AuthenticatedUser, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_client_by_id(client_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveClientForm,
    default_country_code: &str,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let new_client = form.to_new_client(user.establishment_id, default_country_code)?;
    repo.create_clients(&[new_client])?;

    Ok(())
}

pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: &SaveClientForm,
    default_country_code: &str,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    let updates = form.to_update_client(default_country_code)?;
    let updated = repo.update_client(client_id, user.establishment_id, &updates)?;

    Ok(updated)
}

pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_client(client_id, user.establishment_id)?;
    Ok(())
}

/// Parses the uploaded CSV and creates client records in bulk.
/// Expected header: `name,email,phone,birth_date,notes`.
pub fn import_clients<R, S>(
    repo: &R,
    user: &AuthenticatedUser,
    reader: S,
    default_country_code: &str,
) -> ServiceResult<usize>
where
    R: ClientWriter + ?Sized,
    S: std::io::Read,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| ServiceError::Validation(format!("invalid CSV: {e}")))?
        .clone();

    let mut new_clients = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| ServiceError::Validation(format!("invalid CSV: {e}")))?;

        let field = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(name) = field("name") else {
            continue;
        };

        let phone = match field("phone") {
            Some(raw) => Some(
                crate::domain::types::PhoneNumber::from_provider(&raw, default_country_code)?
                    .into_inner(),
            ),
            None => None,
        };
        let birth_date = field("birth_date")
            .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok());

        new_clients.push(NewClient::new(
            user.establishment_id,
            name,
            field("email"),
            phone,
            birth_date,
            field("notes"),
        ));
    }

    if new_clients.is_empty() {
        return Err(ServiceError::Validation(
            "CSV contained no importable rows".to_string(),
        ));
    }

    Ok(repo.create_clients(&new_clients)?)
}
