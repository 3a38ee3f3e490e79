//! WhatsApp messaging provider client (UAZAPI).

use serde::{Deserialize, Serialize};

use crate::domain::types::{PhoneNumber, TypeConstraintError};
use crate::integrations::{IntegrationError, IntegrationResult};
use crate::models::config::UazapiConfig;

#[derive(Clone)]
pub struct UazapiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    default_country_code: String,
}

#[derive(Serialize)]
struct SendTextRequest<'a> {
    number: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendTextResponse {
    /// Provider message id, used to reconcile delivery receipts later.
    #[serde(default)]
    id: Option<String>,
}

impl UazapiClient {
    pub fn new(config: &UazapiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            default_country_code: config.default_country_code.clone(),
        }
    }

    /// Normalizes whatever a caller or provider hands us into E.164.
    pub fn format_phone(&self, raw: &str) -> Result<PhoneNumber, TypeConstraintError> {
        PhoneNumber::from_provider(raw, &self.default_country_code)
    }

    /// Sends a text message, returning the provider message id when the
    /// provider reports one.
    pub async fn send_text(&self, phone: &PhoneNumber, text: &str) -> IntegrationResult<Option<String>> {
        let url = format!("{}/send/text", self.base_url);
        let request = SendTextRequest {
            number: phone.wire_digits(),
            text,
        };

        let response = self
            .client
            .post(&url)
            .header("token", &self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }

        let parsed = response.json::<SendTextResponse>().await.unwrap_or(SendTextResponse { id: None });
        Ok(parsed.id)
    }

    /// Single-attempt send used by campaign and reminder dispatch: any
    /// failure is logged and reported as `false`, never retried.
    pub async fn try_send_text(&self, raw_phone: &str, text: &str) -> bool {
        let phone = match self.format_phone(raw_phone) {
            Ok(phone) => phone,
            Err(e) => {
                log::warn!("Refusing to send to unparseable phone {raw_phone:?}: {e}");
                return false;
            }
        };

        match self.send_text(&phone, text).await {
            Ok(_) => {
                log::info!("Message sent to {phone}");
                true
            }
            Err(e) => {
                log::error!("Failed to send message to {phone}: {e}");
                false
            }
        }
    }
}
