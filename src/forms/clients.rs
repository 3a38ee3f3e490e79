use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{NoteText, PhoneNumber, TypeConstraintError};

#[derive(Deserialize, Validate)]
/// Payload for creating or updating a client record.
pub struct SaveClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn normalize_optional_phone(
    phone: Option<&str>,
    default_country_code: &str,
) -> Result<Option<String>, TypeConstraintError> {
    match phone {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(
            PhoneNumber::from_provider(raw, default_country_code)?.into_inner(),
        )),
        _ => Ok(None),
    }
}

fn sanitize_optional_notes(notes: Option<&str>) -> Result<Option<String>, TypeConstraintError> {
    match notes {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(NoteText::new(raw)?.into_inner())),
        _ => Ok(None),
    }
}

impl SaveClientForm {
    pub fn to_new_client(
        &self,
        establishment_id: i32,
        default_country_code: &str,
    ) -> Result<NewClient, TypeConstraintError> {
        Ok(NewClient::new(
            establishment_id,
            self.name.clone(),
            self.email.clone(),
            normalize_optional_phone(self.phone.as_deref(), default_country_code)?,
            self.birth_date,
            sanitize_optional_notes(self.notes.as_deref())?,
        ))
    }

    pub fn to_update_client(
        &self,
        default_country_code: &str,
    ) -> Result<UpdateClient, TypeConstraintError> {
        Ok(UpdateClient::new(
            self.name.clone(),
            self.email.clone(),
            normalize_optional_phone(self.phone.as_deref(), default_country_code)?,
            self.birth_date,
            sanitize_optional_notes(self.notes.as_deref())?,
        ))
    }
}

#[derive(MultipartForm)]
/// CSV bulk import; columns: name, email, phone, birth_date, notes.
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}
