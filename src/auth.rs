//! Bearer-token authentication for the JSON API.
//!
//! Tokens are HS256 JWTs issued by the account service. Claims carry the
//! tenant (`establishment_id`) and role list used by `ensure_role` checks
//! in the service layer.

use std::future::{Ready, ready};

use actix_web::error::ErrorUnauthorized;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;
use crate::services::errors::ServiceError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject, the account identifier at the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub establishment_id: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            self,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

/// Returns `true` when the role list contains the given role.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Guards a service entry point behind the given role.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> Result<(), ServiceError> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorUnauthorized("server configuration missing")));
        };

        let Some(token) = bearer_token(req) else {
            return ready(Err(ErrorUnauthorized("missing bearer token")));
        };

        let result = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        match result {
            Ok(data) => ready(Ok(data.claims)),
            Err(e) => {
                log::debug!("Rejected bearer token: {e}");
                ready(Err(ErrorUnauthorized("invalid bearer token")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_role_matches_exact_entries() {
        let roles = vec!["salon".to_string(), "salon_admin".to_string()];
        assert!(check_role("salon", &roles));
        assert!(check_role("salon_admin", &roles));
        assert!(!check_role("salon_pro", &roles));
    }

    #[test]
    fn ensure_role_rejects_missing_role() {
        let user = AuthenticatedUser {
            sub: "1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            establishment_id: 1,
            roles: vec!["salon".to_string()],
            exp: usize::MAX,
        };
        assert!(ensure_role(&user, "salon").is_ok());
        assert!(matches!(
            ensure_role(&user, "salon_admin"),
            Err(ServiceError::Unauthorized)
        ));
    }
}
