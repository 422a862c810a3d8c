//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | 201 + user summary; 409 on duplicate email |
//! | `POST` | `/auth/login` | 200 + `access_token` + user summary; 401 otherwise |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use carte_core::{
  store::{CardStore, CredentialStore},
  user::{NewUser, UserSummary},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::Error, password};

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub email:    String,
  pub name:     String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
  pub user: UserSummary,
}

/// `POST /auth/register` — body: `{"email","name","password"}`.
///
/// The password is hashed before anything is stored; the response carries
/// the public-safe summary only, never the hash.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  if state.store.get_user_by_email(&body.email).await?.is_some() {
    return Err(Error::Conflict("email already in use".into()));
  }

  let password_hash = password::hash(&body.password)?;
  let user = state
    .store
    .create_user(NewUser {
      email: body.email,
      name: body.name,
      password_hash,
    })
    .await?;

  tracing::info!(user_id = %user.user_id, "registered new user");
  Ok((
    StatusCode::CREATED,
    Json(RegisterResponse { user: UserSummary::from(&user) }),
  ))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub access_token: String,
  pub user:         UserSummary,
}

/// `POST /auth/login` — body: `{"email","password"}`.
///
/// Unknown email and wrong password produce the same 401; nothing reveals
/// which half failed.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user_by_email(&body.email)
    .await?
    .ok_or(Error::Unauthorized)?;

  if !password::verify(&body.password, &user.password_hash) {
    return Err(Error::Unauthorized);
  }

  let access_token = state.tokens.issue(user.user_id, &user.email)?;
  Ok(Json(LoginResponse {
    access_token,
    user: UserSummary::from(&user),
  }))
}
