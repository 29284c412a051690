//! Minimal JWT payload inspection.
//!
//! The client never verifies token signatures (that is the backend's
//! job); it only needs the `exp` claim to know when the session dies.
//! The payload is the second dot-separated segment, base64url-encoded
//! JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token is not a three-part JWT")]
    Malformed,

    #[error("Token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid claims JSON: {0}")]
    Claims(#[from] serde_json::Error),

    #[error("Token expiry timestamp is out of range")]
    InvalidExpiry,
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Decode the expiration instant from a JWT's `exp` claim (unix seconds).
pub fn expires_at(token: &str) -> Result<DateTime<Utc>, TokenError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return Err(TokenError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims: Claims = serde_json::from_slice(&bytes)?;
    DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::InvalidExpiry)
}

/// True iff the token's expiry instant is in the past.
pub fn is_expired(token: &str) -> Result<bool, TokenError> {
    Ok(expires_at(token)? <= Utc::now())
}

/// Build an unsigned JWT with the given `exp` claim, for tests that need
/// a decodable token without a real backend.
#[cfg(test)]
pub(crate) fn token_expiring_at(exp: DateTime<Utc>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "email": "ada@example.com", "exp": exp.timestamp() }).to_string(),
    );
    format!("{}.{}.sig", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expires_at_reads_exp_claim() {
        let exp = Utc::now() + Duration::hours(1);
        let token = token_expiring_at(exp);
        let decoded = expires_at(&token).unwrap();
        // exp claim has second granularity
        assert_eq!(decoded.timestamp(), exp.timestamp());
    }

    #[test]
    fn test_is_expired() {
        let live = token_expiring_at(Utc::now() + Duration::hours(1));
        assert!(!is_expired(&live).unwrap());

        let stale = token_expiring_at(Utc::now() - Duration::seconds(5));
        assert!(is_expired(&stale).unwrap());
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(matches!(expires_at("no-dots-here"), Err(TokenError::Malformed)));
        assert!(matches!(expires_at("a.b"), Err(TokenError::Malformed)));
        assert!(matches!(expires_at("a.b.c.d"), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_bad_payload_is_rejected() {
        // Not base64
        assert!(matches!(expires_at("a.!!!.c"), Err(TokenError::Encoding(_))));

        // Base64 but not claims JSON
        let payload = URL_SAFE_NO_PAD.encode(b"not json");
        let token = format!("a.{}.c", payload);
        assert!(matches!(expires_at(&token), Err(TokenError::Claims(_))));

        // Claims JSON without exp
        let payload = URL_SAFE_NO_PAD.encode(br#"{"email":"x@y.z"}"#);
        let token = format!("a.{}.c", payload);
        assert!(matches!(expires_at(&token), Err(TokenError::Claims(_))));
    }
}
