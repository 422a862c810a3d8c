//! Card — the business-card aggregate.
//!
//! A card is one row of scalar fields plus three ordered child collections
//! (contact details, social links, web links). The aggregate is always read
//! and written as a unit: an update replaces a child collection wholesale or
//! leaves it untouched, never edits individual rows. Child rows consequently
//! have no client-visible identity — the store assigns internal ids and
//! positions, and neither is serialized.
//!
//! Wire keys are camelCase (`jobTitle`, `contactDetails`, …) to stay
//! compatible with the card-editor front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Child entries ───────────────────────────────────────────────────────────

/// A way of reaching the card owner.
///
/// `kind` is a free-form tag; the editing front end constrains it to
/// `MOBILE` / `EMAIL` / `ADDRESS`, but the store does not enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
  #[serde(rename = "type")]
  pub kind:  String,
  pub value: String,
}

/// A social-media presence: free-text platform label plus URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
  pub platform: String,
  pub url:      String,
}

/// An arbitrary titled link (portfolio, booking page, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebLink {
  pub title: String,
  pub url:   String,
}

// ─── Card ────────────────────────────────────────────────────────────────────

/// The scalar portion of a card. Exactly one per user, enforced by a UNIQUE
/// constraint on `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  #[serde(rename = "id")]
  pub card_id:      Uuid,
  pub user_id:      Uuid,
  pub name:         String,
  pub heading:      Option<String>,
  pub description:  Option<String>,
  pub job_title:    Option<String>,
  pub company_name: Option<String>,
  /// Plain string; not validated beyond being a string. The public surface
  /// pattern-matches it for a preview image (see [`crate::present`]).
  pub video_url:    Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

// ─── Aggregate ───────────────────────────────────────────────────────────────

/// A card plus its three child collections, in insertion order — the unit
/// every store read and write operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
  #[serde(flatten)]
  pub card:            Card,
  pub contact_details: Vec<ContactDetail>,
  pub social_links:    Vec<SocialLink>,
  pub web_links:       Vec<WebLink>,
}

// ─── Input payload ───────────────────────────────────────────────────────────

/// Create/update payload for a card.
///
/// Scalars are taken as-is: on update every scalar column is overwritten
/// with the payload value, absent optionals included (no partial-field
/// skip). The child collections are `Option<Vec<…>>` so the two cases stay
/// distinguishable:
///
/// - key absent from the JSON body → `None` → collection left untouched on
///   update (empty on create);
/// - key present, even as `[]` → `Some(…)` → every existing row of that
///   kind is deleted and the list is inserted in the order given.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
  pub name:            String,
  pub heading:         Option<String>,
  pub description:     Option<String>,
  pub job_title:       Option<String>,
  pub company_name:    Option<String>,
  pub video_url:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact_details: Option<Vec<ContactDetail>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub social_links:    Option<Vec<SocialLink>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub web_links:       Option<Vec<WebLink>>,
}
