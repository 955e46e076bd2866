//! JWT access-token issue and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AulaServiceError;

/// Access-token time-to-live in seconds (7 days).
pub const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// JWT claims payload. `sub` carries the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed HS256 token for the given subject, expiring in
/// [`TOKEN_TTL_SECS`].
pub fn issue_token(subject_id: &str, secret: &str) -> Result<String, AulaServiceError> {
    let claims = TokenClaims {
        sub: subject_id.to_owned(),
        exp: now_secs() + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AulaServiceError::Internal(e.into()))
}

/// Validate a token and return its subject.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Fails with `TokenExpired` past expiry, `TokenInvalid` for anything else
/// wrong with the signature or structure.
pub fn validate_token(token: &str, secret: &str) -> Result<String, AulaServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AulaServiceError::TokenExpired,
        _ => AulaServiceError::InvalidToken,
    })?;

    Ok(data.claims.sub)
}
