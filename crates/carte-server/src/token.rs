//! Bearer-token issue/verify and the `AuthUser` extractor.
//!
//! Tokens are HS256 JWTs carrying the user id and email as claims, signed
//! with the operator-supplied secret. There is no fallback key: the binary
//! refuses to start without one (see `main.rs`), so a `TokenKeys` can only
//! exist with a real secret behind it.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{
  DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte_core::store::{CardStore, CredentialStore};

use crate::{AppState, error::Error};

// ─── Claims ──────────────────────────────────────────────────────────────────

/// The JWT payload: subject (user id), email, issued-at and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  pub sub:   Uuid,
  pub email: String,
  pub iat:   i64,
  pub exp:   i64,
}

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Signing and verification keys derived from the configured secret, plus
/// the token lifetime.
pub struct TokenKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      Duration,
}

impl TokenKeys {
  pub fn new(secret: &str, ttl_hours: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl:      Duration::hours(ttl_hours),
    }
  }

  /// Issue a signed, time-bounded token for the given identity.
  pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
      sub:   user_id,
      email: email.to_owned(),
      iat:   now.timestamp(),
      exp:   (now + self.ttl).timestamp(),
    };
    encode(&Header::default(), &claims, &self.encoding)
      .map_err(|e| Error::Internal(Box::new(e)))
  }

  /// Verify signature and expiry; yield the embedded claims.
  ///
  /// Every failure mode — bad signature, expired, malformed — collapses to
  /// [`Error::Unauthorized`].
  pub fn verify(&self, token: &str) -> Result<Claims, Error> {
    decode::<Claims>(token, &self.decoding, &Validation::default())
      .map(|data| data.claims)
      .map_err(|_| Error::Unauthorized)
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The verified identity behind a protected request. Present in a handler's
/// signature means the bearer token checked out.
#[derive(Debug, Clone)]
pub struct AuthUser {
  pub user_id: Uuid,
  pub email:   String,
}

impl<S> FromRequestParts<AppState<S>> for AuthUser
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(axum::http::header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(Error::Unauthorized)?;

    let token = header_val
      .strip_prefix("Bearer ")
      .ok_or(Error::Unauthorized)?;

    let claims = state.tokens.verify(token)?;
    Ok(AuthUser { user_id: claims.sub, email: claims.email })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip_preserves_identity() {
    let keys = TokenKeys::new("unit-test-secret", 24);
    let user_id = Uuid::new_v4();

    let token = keys.issue(user_id, "alice@example.com").unwrap();
    let claims = keys.verify(&token).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "alice@example.com");
    assert!(claims.exp > claims.iat);
  }

  #[test]
  fn verify_rejects_other_secret() {
    let issuer = TokenKeys::new("secret-one", 24);
    let verifier = TokenKeys::new("secret-two", 24);

    let token = issuer.issue(Uuid::new_v4(), "a@example.com").unwrap();
    assert!(matches!(verifier.verify(&token), Err(Error::Unauthorized)));
  }

  #[test]
  fn verify_rejects_expired_token() {
    // Issued already two hours past its expiry, well outside any leeway.
    let keys = TokenKeys::new("unit-test-secret", -2);
    let token = keys.issue(Uuid::new_v4(), "a@example.com").unwrap();
    assert!(matches!(keys.verify(&token), Err(Error::Unauthorized)));
  }

  #[test]
  fn verify_rejects_garbage() {
    let keys = TokenKeys::new("unit-test-secret", 24);
    assert!(matches!(
      keys.verify("not.a.token"),
      Err(Error::Unauthorized)
    ));
  }
}
