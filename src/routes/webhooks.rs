//! Provider webhook ingestion endpoints.
//!
//! Both endpoints read the raw body (required for signature checks and
//! the audit trail), record the delivery, then hand off to the
//! reconciliation service. Handler failures surface as HTTP 500 with the
//! error message; there is no retry queue.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::SERVICE_ADMIN_ROLE;
use crate::domain::webhook_event::{WebhookProvider, WebhookStatus};
use crate::integrations::signature::{constant_time_eq, verify_hmac_sha256};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::errors::ServiceError;
use crate::services::webhooks::{self, finish_event, record_event};

const ASAAS_TOKEN_HEADER: &str = "asaas-access-token";
const UAZAPI_SIGNATURE_HEADER: &str = "x-uazapi-signature";

fn header<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[post("/asaas")]
pub async fn asaas_webhook(
    req: HttpRequest,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    if let Some(expected) = config.asaas.webhook_token.as_deref() {
        let provided = header(&req, ASAAS_TOKEN_HEADER);
        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            log::warn!("Rejected Asaas webhook: bad access token");
            return HttpResponse::Unauthorized().json(json!({ "error": "invalid access token" }));
        }
    }

    let Ok(raw) = std::str::from_utf8(&body) else {
        return HttpResponse::BadRequest().json(json!({ "error": "body is not valid UTF-8" }));
    };

    let event = match record_event(repo.get_ref(), WebhookProvider::Asaas, raw) {
        Ok(event) => event,
        Err(e) => {
            log::error!("Failed to record Asaas webhook event: {e}");
            return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
        }
    };

    match webhooks::asaas::apply_asaas_event(repo.get_ref(), raw) {
        Ok(status) => {
            finish_event(repo.get_ref(), event.id, status, None);
            HttpResponse::Ok().json(json!({ "received": true }))
        }
        Err(e) => {
            log::error!("Asaas webhook processing failed: {e}");
            finish_event(
                repo.get_ref(),
                event.id,
                WebhookStatus::Failed,
                Some(&e.to_string()),
            );
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

#[post("/uazapi")]
pub async fn uazapi_webhook(
    req: HttpRequest,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    if let Some(secret) = config.uazapi.webhook_secret.as_deref() {
        let signature = header(&req, UAZAPI_SIGNATURE_HEADER);
        if !verify_hmac_sha256(secret, &body, signature) {
            log::warn!("Rejected UAZAPI webhook: bad signature");
            return HttpResponse::Unauthorized().json(json!({ "error": "invalid signature" }));
        }
    }

    let Ok(raw) = std::str::from_utf8(&body) else {
        return HttpResponse::BadRequest().json(json!({ "error": "body is not valid UTF-8" }));
    };

    let event = match record_event(repo.get_ref(), WebhookProvider::Uazapi, raw) {
        Ok(event) => event,
        Err(e) => {
            log::error!("Failed to record UAZAPI webhook event: {e}");
            return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
        }
    };

    match webhooks::uazapi::apply_uazapi_event(
        repo.get_ref(),
        raw,
        config.uazapi.establishment_id,
        &config.uazapi.default_country_code,
    ) {
        Ok(status) => {
            finish_event(repo.get_ref(), event.id, status, None);
            HttpResponse::Ok().json(json!({ "received": true }))
        }
        Err(e) => {
            log::error!("UAZAPI webhook processing failed: {e}");
            finish_event(
                repo.get_ref(),
                event.id,
                WebhookStatus::Failed,
                Some(&e.to_string()),
            );
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

#[derive(Deserialize)]
struct EventsQueryParams {
    limit: Option<i64>,
}

/// Operational view of recent provider deliveries.
#[get("/events")]
pub async fn list_webhook_events(
    params: web::Query<EventsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    ensure_role(&user, SERVICE_ADMIN_ROLE)?;

    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    let events = webhooks::list_recent_events(repo.get_ref(), limit)?;
    Ok(HttpResponse::Ok().json(events))
}
