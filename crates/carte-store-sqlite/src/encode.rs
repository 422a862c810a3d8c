//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Child entries are plain text columns and
//! need no decoding.

use carte_core::{
  card::{Card, CardView, ContactDetail, SocialLink, WebLink},
  user::User,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub email:         String,
  pub name:          String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      email:         self.email,
      name:          self.name,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `cards` row.
pub struct RawCard {
  pub card_id:      String,
  pub user_id:      String,
  pub name:         String,
  pub heading:      Option<String>,
  pub description:  Option<String>,
  pub job_title:    Option<String>,
  pub company_name: Option<String>,
  pub video_url:    Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawCard {
  pub fn into_card(self) -> Result<Card> {
    Ok(Card {
      card_id:      decode_uuid(&self.card_id)?,
      user_id:      decode_uuid(&self.user_id)?,
      name:         self.name,
      heading:      self.heading,
      description:  self.description,
      job_title:    self.job_title,
      company_name: self.company_name,
      video_url:    self.video_url,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// A card row joined with its three child collections, read in one
/// transaction so the aggregate is internally consistent.
pub struct RawCardView {
  pub card:            RawCard,
  pub contact_details: Vec<ContactDetail>,
  pub social_links:    Vec<SocialLink>,
  pub web_links:       Vec<WebLink>,
}

impl RawCardView {
  pub fn into_view(self) -> Result<CardView> {
    Ok(CardView {
      card:            self.card.into_card()?,
      contact_details: self.contact_details,
      social_links:    self.social_links,
      web_links:       self.web_links,
    })
  }
}
