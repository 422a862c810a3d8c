//! Handler for the unauthenticated public card page.
//!
//! The path identifier is the owning user's UUID as embedded in a shareable
//! link — opaque and unguessable, which is the whole access control on this
//! surface.

use axum::{Json, extract::{Path, State}};
use carte_core::{
  present::PublicCard,
  store::{CardStore, CredentialStore},
};
use uuid::Uuid;

use crate::{AppState, error::Error};

/// `GET /cards/{user_id}` — the aggregate enriched with presentation-only
/// derivations (video preview image, social categories, contact hrefs).
pub async fn card<S>(
  State(state): State<AppState<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<PublicCard>, Error>
where
  S: CredentialStore + CardStore + Clone + Send + Sync + 'static,
{
  let view = state
    .store
    .get_card(user_id)
    .await?
    .ok_or_else(|| Error::NotFound(format!("no card for user {user_id}")))?;

  Ok(Json(PublicCard::from_view(view)))
}
