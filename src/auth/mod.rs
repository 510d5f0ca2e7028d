// auth/mod.rs - Owner claim extraction
//
// Tokens reaching this service were verified by the upstream gateway. The
// claims are read as-is; signatures, expiry and audience are not checked again.

use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims the note handler relies on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Verified subject, used as the note owner id
    pub sub: Option<String>,
}

/// Owner id from the forwarded `Authorization: Bearer <jwt>` header.
///
/// Any missing or unreadable piece yields `None`, which the handler answers
/// with 401.
pub fn owner_from_headers(headers: &HeaderMap) -> Option<String> {
    let token = match extract_bearer_token(headers) {
        Ok(token) => token,
        Err(msg) => {
            tracing::debug!("No owner claim: {}", msg);
            return None;
        }
    };

    match read_claims(token) {
        Ok(claims) => claims.sub.filter(|sub| !sub.is_empty()),
        Err(msg) => {
            tracing::debug!("No owner claim: {}", msg);
            None
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

/// Decode claims of an already-verified token
fn read_claims(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| format!("Unreadable JWT claims: {}", e))?;

    Ok(token_data.claims)
}
