//! Error types for `carte-core`.

use thiserror::Error;
use uuid::Uuid;

/// Failures raised by the store traits.
///
/// The first three variants are domain outcomes the HTTP layer maps to
/// specific statuses; [`Error::Backend`] covers every unclassified storage
/// failure and is never shown to callers verbatim.
#[derive(Debug, Error)]
pub enum Error {
  #[error("email address already registered")]
  EmailTaken,

  #[error("card already exists for user {0}")]
  CardExists(Uuid),

  #[error("no card exists for user {0}")]
  CardNotFound(Uuid),

  #[error("storage backend failure: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box an arbitrary backend failure into [`Error::Backend`].
  pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Backend(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
