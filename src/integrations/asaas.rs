//! Payment gateway client (Asaas).
//!
//! Only the provisioning surface the service needs: customers are created
//! lazily when a subscription is sold, and subscriptions are created or
//! canceled remotely. Everything else arrives through the webhook.

use serde::{Deserialize, Serialize};

use crate::domain::subscription::BillingCycle;
use crate::integrations::{IntegrationError, IntegrationResult};
use crate::models::config::AsaasConfig;

#[derive(Clone)]
pub struct AsaasClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct CreateCustomerRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "mobilePhone")]
    mobile_phone: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateSubscriptionRequest<'a> {
    customer: &'a str,
    #[serde(rename = "billingType")]
    billing_type: &'a str,
    /// Decimal value in reais, the unit the gateway expects on the wire.
    value: f64,
    cycle: &'a str,
    description: &'a str,
    #[serde(rename = "externalReference")]
    external_reference: &'a str,
}

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

fn cycle_str(cycle: BillingCycle) -> &'static str {
    match cycle {
        BillingCycle::Monthly => "MONTHLY",
        BillingCycle::Yearly => "YEARLY",
    }
}

impl AsaasClient {
    pub fn new(config: &AsaasConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Provisioning is optional; without an API key subscriptions stay
    /// local-only.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> IntegrationResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(IntegrationError::NotConfigured)
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> IntegrationResult<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("access_token", self.api_key()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }

        Ok(response)
    }

    /// Creates a gateway customer and returns its id.
    pub async fn create_customer(
        &self,
        name: &str,
        email: Option<&str>,
        mobile_phone: Option<&str>,
    ) -> IntegrationResult<String> {
        let request = CreateCustomerRequest {
            name,
            email,
            mobile_phone,
        };
        let response = self.post_json("/customers", &request).await?;
        let parsed = response.json::<IdResponse>().await?;
        Ok(parsed.id)
    }

    /// Creates a recurring subscription charge and returns the gateway
    /// subscription id.
    pub async fn create_subscription(
        &self,
        customer_id: &str,
        amount_cents: i64,
        cycle: BillingCycle,
        description: &str,
        external_reference: &str,
    ) -> IntegrationResult<String> {
        let request = CreateSubscriptionRequest {
            customer: customer_id,
            billing_type: "UNDEFINED",
            value: amount_cents as f64 / 100.0,
            cycle: cycle_str(cycle),
            description,
            external_reference,
        };
        let response = self.post_json("/subscriptions", &request).await?;
        let parsed = response.json::<IdResponse>().await?;
        Ok(parsed.id)
    }

    /// Cancels the gateway subscription.
    pub async fn cancel_subscription(&self, provider_ref: &str) -> IntegrationResult<()> {
        let url = format!("{}/subscriptions/{provider_ref}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .header("access_token", self.api_key()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }

        Ok(())
    }
}
