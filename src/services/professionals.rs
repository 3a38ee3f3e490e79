//! Services handling professional administration.

use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::professional::Professional;
use crate::forms::professionals::{AddProfessionalForm, UpdateProfessionalForm};
use crate::repository::{ProfessionalReader, ProfessionalWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_professionals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    only_active: bool,
) -> ServiceResult<Vec<Professional>>
where
    R: ProfessionalReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_professionals(user.establishment_id, only_active)?)
}

pub fn add_professional<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddProfessionalForm,
    default_country_code: &str,
) -> ServiceResult<Professional>
where
    R: ProfessionalWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_professional = form.to_new_professional(user.establishment_id, default_country_code)?;
    Ok(repo.create_professional(&new_professional)?)
}

pub fn update_professional<R>(
    repo: &R,
    user: &AuthenticatedUser,
    professional_id: i32,
    form: &UpdateProfessionalForm,
) -> ServiceResult<Professional>
where
    R: ProfessionalReader + ProfessionalWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    repo.get_professional_by_id(professional_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.update_professional(professional_id, user.establishment_id, &form.into())?)
}
