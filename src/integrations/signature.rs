//! Inbound webhook credential checks.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Length-guarded comparison without early exit on the first differing
/// byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Verifies a hex-encoded HMAC-SHA256 signature over the raw request body.
/// Accepts an optional `sha256=` prefix on the header value.
pub fn verify_hmac_sha256(secret: &str, body: &[u8], signature: &str) -> bool {
    let signature = signature.strip_prefix("sha256=").unwrap_or(signature);

    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    constant_time_eq(signature.as_bytes(), expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let body = br#"{"event":"messages"}"#;
        let signature = sign("topsecret", body);
        assert!(verify_hmac_sha256("topsecret", body, &signature));
        assert!(verify_hmac_sha256(
            "topsecret",
            body,
            &format!("sha256={signature}")
        ));
    }

    #[test]
    fn rejects_tampered_body_or_wrong_secret() {
        let body = br#"{"event":"messages"}"#;
        let signature = sign("topsecret", body);
        assert!(!verify_hmac_sha256("topsecret", b"{}", &signature));
        assert!(!verify_hmac_sha256("other", body, &signature));
    }

    #[test]
    fn constant_time_eq_handles_length_mismatch() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
