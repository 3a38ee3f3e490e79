//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (normalized E.164 phone numbers,
//! validated email, sanitized note text) so that once a value reaches the
//! domain layer it can be treated as trusted.

use std::fmt::{Display, Formatter};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Normalizes and validates an email string.
pub fn normalize_email(email: &str) -> Result<String, TypeConstraintError> {
    let normalized = email.trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_email(&email.into())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text note sanitized of markup before storage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteText(String);

impl NoteText {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to
    /// E.164 format. Requires the international prefix.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    /// Accepts the formats messaging providers emit: bare national or
    /// international digits, optionally suffixed with a JID domain
    /// (`5511999990000@s.whatsapp.net`). Digits already carrying the
    /// default country code pass through; national numbers get it
    /// prepended.
    pub fn from_provider(value: &str, default_country_code: &str) -> Result<Self, TypeConstraintError> {
        if value.trim_start().starts_with('+') {
            return Self::new(value);
        }

        let digits: String = value
            .chars()
            .take_while(|c| *c != '@')
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        // A national BR number is at most 11 digits; anything longer that
        // already starts with the country code is international.
        let international = digits.starts_with(default_country_code)
            && digits.len() > 10 + default_country_code.len();
        if international {
            Self::new(format!("+{digits}"))
        } else {
            Self::new(format!("+{default_country_code}{digits}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits without the `+` prefix, the form wire APIs expect.
    pub fn wire_digits(&self) -> &str {
        self.0.trim_start_matches('+')
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        let email = Email::new("  John@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "john@example.com");
        assert!(Email::new("not-an-email").is_err());
    }

    #[test]
    fn phone_requires_international_prefix() {
        let phone = PhoneNumber::new("+55 11 99999-0000").unwrap();
        assert_eq!(phone.as_str(), "+5511999990000");
        assert_eq!(phone.wire_digits(), "5511999990000");
        assert!(PhoneNumber::new("").is_err());
    }

    #[test]
    fn provider_phone_accepts_jid_and_national_digits() {
        let jid = PhoneNumber::from_provider("5511999990000@s.whatsapp.net", "55").unwrap();
        assert_eq!(jid.as_str(), "+5511999990000");

        let national = PhoneNumber::from_provider("11 99999-0000", "55").unwrap();
        assert_eq!(national.as_str(), "+5511999990000");
    }

    #[test]
    fn note_text_strips_markup() {
        let note = NoteText::new("<script>alert(1)</script>prefers morning slots").unwrap();
        assert_eq!(note.as_str(), "prefers morning slots");
        assert!(NoteText::new("<script>only markup</script>").is_err());
    }
}
