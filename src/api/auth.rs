//! Bearer-credential auth gate.
//!
//! The vault trusts whatever principal the gate resolves; issuing accounts,
//! signup, and login live outside this service. The shipped gate validates
//! HMAC-SHA256-signed expiring tokens of the form
//! `base64(claims).base64(signature)` and can mint them for tooling and
//! tests. The [`AuthGate`] trait is the seam for substituting a different
//! issuer.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::types::errors::{AuthError, ConfigError};

use super::AppState;

/// The identity resolved from a verified bearer credential.
///
/// Its `user_id` is the sole authorization scope for every vault query.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
}

/// Validates a bearer token and resolves the principal behind it.
pub trait AuthGate: Send + Sync {
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

#[derive(Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    exp: i64,
}

/// HMAC-SHA256 token gate keyed by the configured auth secret.
pub struct HmacAuthGate {
    key: hmac::Key,
}

impl HmacAuthGate {
    /// # Errors
    /// Returns [`ConfigError::MissingAuthSecret`] for an empty secret; an
    /// unsigned gate would accept forged principals.
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingAuthSecret);
        }
        Ok(Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
        })
    }

    /// Mints a token for `user_id` valid for `ttl` from now.
    pub fn issue_token(&self, user_id: &str, ttl: Duration) -> String {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: now_ts() + ttl.as_secs() as i64,
        };
        let payload =
            BASE64.encode(serde_json::to_vec(&claims).expect("token claims serialize to JSON"));
        let signature = hmac::sign(&self.key, payload.as_bytes());
        format!("{}.{}", payload, BASE64.encode(signature.as_ref()))
    }
}

impl AuthGate for HmacAuthGate {
    fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::Malformed)?;
        let signature = BASE64.decode(signature).map_err(|_| AuthError::Malformed)?;

        // Signature first: claims from an unverified payload are untrusted input.
        hmac::verify(&self.key, payload.as_bytes(), &signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let claims_bytes = BASE64.decode(payload).map_err(|_| AuthError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&claims_bytes).map_err(|_| AuthError::Malformed)?;

        if claims.exp < now_ts() {
            return Err(AuthError::Expired);
        }

        Ok(Principal {
            user_id: claims.sub,
        })
    }
}

/// Middleware guarding the vault routes.
///
/// Resolves `Authorization: Bearer <token>` through the gate and stashes
/// the [`Principal`] as a request extension; anything else is a 401 with a
/// deliberately generic body.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let principal = match token.map(|t| state.auth.verify(t)) {
        Some(Ok(principal)) => principal,
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "missing or invalid credentials" })),
            )
                .into_response();
        }
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}

fn now_ts() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
