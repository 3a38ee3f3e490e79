//! HTTP clients for the external providers the service talks to.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod asaas;
pub mod signature;
pub mod uazapi;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("provider is not configured")]
    NotConfigured,

    #[error(transparent)]
    Phone(#[from] TypeConstraintError),
}

pub type IntegrationResult<T> = Result<T, IntegrationError>;
