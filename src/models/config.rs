//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HS256 secret used to validate API bearer tokens.
    pub secret: String,
    pub uazapi: UazapiConfig,
    pub asaas: AsaasConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// WhatsApp messaging provider settings.
pub struct UazapiConfig {
    pub base_url: String,
    pub token: String,
    /// Tenant the configured WhatsApp instance belongs to; inbound
    /// events are scoped to it.
    #[serde(default = "default_establishment_id")]
    pub establishment_id: i32,
    /// Country calling code prepended to national numbers.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    /// Shared secret for inbound webhook signatures. Verification is
    /// skipped when unset.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Payment gateway settings.
pub struct AsaasConfig {
    #[serde(default = "default_asaas_base_url")]
    pub base_url: String,
    /// API key for outbound provisioning calls. Provisioning is skipped
    /// when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Expected `asaas-access-token` header on inbound webhooks.
    /// Verification is skipped when unset.
    #[serde(default)]
    pub webhook_token: Option<String>,
}

fn default_country_code() -> String {
    "55".to_string()
}

fn default_establishment_id() -> i32 {
    1
}

fn default_asaas_base_url() -> String {
    "https://api.asaas.com/v3".to_string()
}
