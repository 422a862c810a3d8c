//! Handlers for the authenticated `/cards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST`  | `/cards` | 201 + aggregate; 409 if the user already has one |
//! | `GET`   | `/cards/me` | 200 + aggregate, or `null` when absent |
//! | `PATCH` | `/cards` | 200 + reloaded aggregate; 404 if none exists |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use carte_core::{
  card::{CardInput, CardView},
  store::{CardStore, CredentialStore},
};

use crate::{AppState, error::Error, token::AuthUser};

/// `POST /cards` — create the caller's card with any child collections in
/// the payload.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  auth: AuthUser,
  Json(input): Json<CardInput>,
) -> Result<impl IntoResponse, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  let view = state.store.create_card(auth.user_id, input).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /cards/me` — the caller's own aggregate, or JSON `null` when no
/// card exists yet. "No card" is an answer, not an error.
pub async fn me<S>(
  State(state): State<AppState<S>>,
  auth: AuthUser,
) -> Result<Json<Option<CardView>>, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.get_card(auth.user_id).await?))
}

/// `PATCH /cards` — overwrite scalars, replace any child collection whose
/// key is present in the payload, and return the reloaded aggregate.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  auth: AuthUser,
  Json(input): Json<CardInput>,
) -> Result<Json<CardView>, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.update_card(auth.user_id, input).await?))
}
