//! User — the account that owns a card.
//!
//! A user is created once at registration and never changes afterwards.
//! The full [`User`] record carries the password hash and therefore has no
//! serde derives at all; [`UserSummary`] is the only user shape that ever
//! crosses the API boundary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered account. Held internally; never serialized.
#[derive(Debug, Clone)]
pub struct User {
  pub user_id:       Uuid,
  /// Stored exactly as supplied — comparison is case-sensitive.
  pub email:         String,
  pub name:          String,
  /// Argon2 PHC string, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::CredentialStore::create_user`].
/// `user_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub name:          String,
  pub password_hash: String,
}

/// The public-safe projection of a [`User`] — id, email and display name,
/// never the hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
  pub id:    Uuid,
  pub email: String,
  pub name:  String,
}

impl From<&User> for UserSummary {
  fn from(u: &User) -> Self {
    Self {
      id:    u.user_id,
      email: u.email.clone(),
      name:  u.name.clone(),
    }
  }
}
