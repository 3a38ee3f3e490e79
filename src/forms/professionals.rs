use serde::Deserialize;
use validator::Validate;

use crate::domain::professional::{NewProfessional, UpdateProfessional};
use crate::domain::types::{PhoneNumber, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddProfessionalForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 10000))]
    pub commission_bps: i32,
}

impl AddProfessionalForm {
    pub fn to_new_professional(
        &self,
        establishment_id: i32,
        default_country_code: &str,
    ) -> Result<NewProfessional, TypeConstraintError> {
        let phone = match self.phone.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                PhoneNumber::from_provider(raw, default_country_code)?.into_inner(),
            ),
            _ => None,
        };
        Ok(NewProfessional::new(
            establishment_id,
            self.name.clone(),
            self.email.clone(),
            phone,
            self.commission_bps,
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfessionalForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 10000))]
    pub commission_bps: i32,
    pub active: bool,
}

impl From<&UpdateProfessionalForm> for UpdateProfessional {
    fn from(form: &UpdateProfessionalForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            phone: form
                .phone
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            commission_bps: form.commission_bps,
            active: form.active,
        }
    }
}
