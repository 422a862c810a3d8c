//! Password hashing and verification.
//!
//! Secrets are stored as argon2 PHC strings with the crate's default
//! parameters — the fixed cost factor for this deployment. Verification
//! failure carries no detail: a wrong password and a malformed stored hash
//! are indistinguishable to callers.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::error::Error;

/// Hash a plaintext password into an argon2 PHC string.
pub fn hash(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(Error::Hash)
}

/// Check a plaintext password against a stored PHC string.
pub fn verify(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify_roundtrip() {
    let phc = hash("correct horse battery staple").unwrap();
    assert!(phc.starts_with("$argon2"));
    assert!(verify("correct horse battery staple", &phc));
    assert!(!verify("wrong password", &phc));
  }

  #[test]
  fn malformed_stored_hash_never_verifies() {
    assert!(!verify("anything", "not-a-phc-string"));
  }
}
