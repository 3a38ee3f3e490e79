//! Service catalog administration.

use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::service::Service;
use crate::forms::catalog::{AddServiceForm, UpdateServiceForm};
use crate::repository::{ServiceReader, ServiceWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_services<R>(
    repo: &R,
    user: &AuthenticatedUser,
    only_active: bool,
) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_services(user.establishment_id, only_active)?)
}

pub fn add_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    Ok(repo.create_service(&form.to_new_service(user.establishment_id))?)
}

pub fn update_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    service_id: i32,
    form: &UpdateServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceReader + ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    repo.get_service_by_id(service_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.update_service(service_id, user.establishment_id, &form.into())?)
}
