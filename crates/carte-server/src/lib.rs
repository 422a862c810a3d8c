//! HTTP layer for Carte.
//!
//! Exposes an axum [`Router`] over any credential/card store pair: auth
//! endpoints, the authenticated card CRUD surface, and the unauthenticated
//! public card page.

pub mod error;
pub mod handlers;
pub mod password;
pub mod token;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use carte_core::store::{CardStore, CredentialStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use token::TokenKeys;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `CARTE_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Operator-supplied signing secret. Required — startup fails without
  /// it; there is no built-in default.
  pub jwt_secret:      String,
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 { 24 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub tokens: Arc<TokenKeys>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the Carte server.
///
/// `/cards/me` is registered beside `/cards/{user_id}`; the static segment
/// wins, so `me` always means "the authenticated caller".
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/auth/register", post(handlers::auth::register::<S>))
    .route("/auth/login",    post(handlers::auth::login::<S>))
    .route(
      "/cards",
      post(handlers::cards::create::<S>).patch(handlers::cards::update::<S>),
    )
    .route("/cards/me",        get(handlers::cards::me::<S>))
    .route("/cards/{user_id}", get(handlers::public::card::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
