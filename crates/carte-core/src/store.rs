//! The `CredentialStore` and `CardStore` traits.
//!
//! One trait per backing concern: credentials (users and their password
//! hashes) and the card aggregate. Both are implemented by storage backends
//! (e.g. `carte-store-sqlite`); higher layers depend on these abstractions,
//! not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`), and all report
//! failure through the shared [`crate::Error`] taxonomy so callers can map
//! conflicts and absences without knowing the backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  card::{CardInput, CardView},
  user::{NewUser, User},
};

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Abstraction over user-account storage.
pub trait CredentialStore: Send + Sync {
  /// Create and persist a new user. The store assigns `user_id` and
  /// `created_at`.
  ///
  /// Fails with [`crate::Error::EmailTaken`] if the email is already
  /// registered; a failed attempt leaves the store unchanged.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Look up a user by exact (case-sensitive) email. `None` if absent.
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>>> + Send + 'a;

  /// Retrieve a user by id. `None` if absent.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;
}

// ─── Cards ───────────────────────────────────────────────────────────────────

/// Abstraction over card-aggregate storage.
///
/// A card's lifecycle per user is `Absent → Present` (create) and
/// `Present → Present` (update); no delete transition is exposed. Every
/// multi-statement write happens inside a single backend transaction —
/// either every change commits or none does.
pub trait CardStore: Send + Sync {
  /// Create the card for `user_id` together with any child rows in the
  /// payload, atomically.
  ///
  /// Fails with [`crate::Error::CardExists`] if the user already has one;
  /// the existing card is left unmodified.
  fn create_card(
    &self,
    user_id: Uuid,
    input: CardInput,
  ) -> impl Future<Output = Result<CardView>> + Send + '_;

  /// Read the full aggregate for `user_id`, children in insertion order.
  /// Returns `None` when the user has no card — callers distinguish
  /// "no card yet" from failure.
  fn get_card(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<CardView>>> + Send + '_;

  /// Overwrite the card for `user_id`, atomically.
  ///
  /// Every scalar column takes the payload value unconditionally. Each
  /// child collection is independently either replaced wholesale (payload
  /// key present, even as an empty list) or left untouched (key absent).
  /// Returns the fully reloaded aggregate.
  ///
  /// Fails with [`crate::Error::CardNotFound`] if the user has no card;
  /// a failed call has no observable side effect.
  fn update_card(
    &self,
    user_id: Uuid,
    input: CardInput,
  ) -> impl Future<Output = Result<CardView>> + Send + '_;
}
