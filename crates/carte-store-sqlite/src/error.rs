//! Error type for `carte-store-sqlite`.
//!
//! Domain outcomes (`EmailTaken`, `CardExists`, `CardNotFound`) convert to
//! their `carte_core` counterparts; everything else is boxed into
//! [`carte_core::Error::Backend`].

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("email address already registered")]
  EmailTaken,

  #[error("card already exists for user {0}")]
  CardExists(Uuid),

  #[error("no card exists for user {0}")]
  CardNotFound(Uuid),
}

impl From<Error> for carte_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::EmailTaken => Self::EmailTaken,
      Error::CardExists(user_id) => Self::CardExists(user_id),
      Error::CardNotFound(user_id) => Self::CardNotFound(user_id),
      other => Self::backend(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
