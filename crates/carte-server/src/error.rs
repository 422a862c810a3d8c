//! Error types and axum `IntoResponse` implementation.
//!
//! The taxonomy the HTTP surface exposes: Conflict (409), NotFound (404),
//! Unauthorized (401), and a generic 500 for everything backend-shaped.
//! Internal failures are logged in full and never echoed to the caller.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("password hashing failed: {0}")]
  Hash(argon2::password_hash::Error),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<carte_core::Error> for Error {
  fn from(e: carte_core::Error) -> Self {
    use carte_core::Error as Core;
    match e {
      Core::EmailTaken => Self::Conflict("email already in use".into()),
      Core::CardExists(_) => Self::Conflict("user already has a card".into()),
      Core::CardNotFound(_) => Self::NotFound("card not found".into()),
      Core::Backend(source) => Self::Internal(source),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Bearer"),
        );
        res
      }
      Error::NotFound(msg) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
      }
      Error::Conflict(msg) => {
        (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
      }
      Error::Hash(e) => {
        tracing::error!(error = %e, "password hashing failed");
        internal_response()
      }
      Error::Internal(source) => {
        tracing::error!(error = %source, "request failed on a backend error");
        internal_response()
      }
    }
  }
}

/// The one body every internal failure maps to — backend detail stays in
/// the logs.
fn internal_response() -> Response {
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({ "error": "internal server error" })),
  )
    .into_response()
}
