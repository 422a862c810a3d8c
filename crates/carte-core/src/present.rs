//! Presentation-only derivations for the public card page.
//!
//! Everything here is a pure function of stored data — never persisted,
//! always derived at read time. The public surface uses these to enrich the
//! aggregate with a video preview image, a category per social link, and an
//! action hint per contact detail.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::card::{Card, CardView, ContactDetail, SocialLink, WebLink};

// ─── Video preview ───────────────────────────────────────────────────────────

/// Matches the path fragment that precedes a YouTube video id in the URL
/// shapes YouTube hands out (`watch?v=`, `youtu.be/`, `embed/`, `/v/`,
/// `&v=`, `/u/<x>/`).
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
    .expect("youtube id pattern")
});

/// Derive a preview-image URL from a video URL.
///
/// A URL carrying an 11-character YouTube video id deterministically yields
/// the `img.youtube.com` thumbnail for that id. Every other shape —
/// including Vimeo, whose thumbnails need an API round-trip — yields `None`.
pub fn video_preview_image(url: &str) -> Option<String> {
  let id = YOUTUBE_ID.captures(url)?.get(1)?.as_str();
  if id.len() != 11 {
    return None;
  }
  Some(format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"))
}

// ─── Social classification ───────────────────────────────────────────────────

/// The recognized platform categories for a social link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialCategory {
  Instagram,
  LinkedIn,
  Twitter,
  GitHub,
  Generic,
}

/// Classify a free-text platform label by case-insensitive substring match.
///
/// The bare label `x` counts as Twitter; any other unrecognized label falls
/// back to [`SocialCategory::Generic`].
pub fn classify_platform(platform: &str) -> SocialCategory {
  let p = platform.to_lowercase();
  if p.contains("instagram") {
    SocialCategory::Instagram
  } else if p.contains("linkedin") {
    SocialCategory::LinkedIn
  } else if p.contains("twitter") || p.trim() == "x" {
    SocialCategory::Twitter
  } else if p.contains("github") {
    SocialCategory::GitHub
  } else {
    SocialCategory::Generic
  }
}

// ─── Contact action hints ────────────────────────────────────────────────────

/// Derive the href a card page would put behind a contact detail:
/// `tel:` for mobile numbers, `mailto:` for email addresses, nothing for
/// other kinds (addresses render as plain text).
pub fn contact_href(kind: &str, value: &str) -> Option<String> {
  if kind.eq_ignore_ascii_case("mobile") {
    Some(format!("tel:{value}"))
  } else if kind.eq_ignore_ascii_case("email") {
    Some(format!("mailto:{value}"))
  } else {
    None
  }
}

// ─── Public card ─────────────────────────────────────────────────────────────

/// A contact detail with its derived action hint.
#[derive(Debug, Clone, Serialize)]
pub struct PublicContactDetail {
  #[serde(flatten)]
  pub detail: ContactDetail,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub href:   Option<String>,
}

/// A social link with its derived platform category.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSocialLink {
  #[serde(flatten)]
  pub link:     SocialLink,
  pub category: SocialCategory,
}

/// The unauthenticated read model for a card — the aggregate plus the
/// derived presentation facts. Never stored, always computed from a
/// [`CardView`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCard {
  #[serde(flatten)]
  pub card:                Card,
  pub contact_details:     Vec<PublicContactDetail>,
  pub social_links:        Vec<PublicSocialLink>,
  pub web_links:           Vec<WebLink>,
  pub video_preview_image: Option<String>,
}

impl PublicCard {
  pub fn from_view(view: CardView) -> Self {
    let video_preview_image = view
      .card
      .video_url
      .as_deref()
      .and_then(video_preview_image);

    let contact_details = view
      .contact_details
      .into_iter()
      .map(|detail| {
        let href = contact_href(&detail.kind, &detail.value);
        PublicContactDetail { detail, href }
      })
      .collect();

    let social_links = view
      .social_links
      .into_iter()
      .map(|link| {
        let category = classify_platform(&link.platform);
        PublicSocialLink { link, category }
      })
      .collect();

    Self {
      card: view.card,
      contact_details,
      social_links,
      web_links: view.web_links,
      video_preview_image,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // ── Video preview ───────────────────────────────────────────────────────

  #[test]
  fn watch_url_yields_thumbnail() {
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    assert_eq!(
      video_preview_image(url).as_deref(),
      Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"),
    );
  }

  #[test]
  fn short_link_yields_thumbnail() {
    let url = "https://youtu.be/dQw4w9WgXcQ";
    assert_eq!(
      video_preview_image(url).as_deref(),
      Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"),
    );
  }

  #[test]
  fn embed_url_yields_thumbnail() {
    let url = "https://www.youtube.com/embed/dQw4w9WgXcQ";
    assert!(video_preview_image(url).is_some());
  }

  #[test]
  fn trailing_params_are_cut_at_delimiters() {
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s";
    assert_eq!(
      video_preview_image(url).as_deref(),
      Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"),
    );
  }

  #[test]
  fn non_standard_id_length_yields_none() {
    assert!(video_preview_image("https://youtu.be/short").is_none());
  }

  #[test]
  fn vimeo_yields_none() {
    assert!(video_preview_image("https://vimeo.com/123456789").is_none());
  }

  #[test]
  fn derivation_is_deterministic() {
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    assert_eq!(video_preview_image(url), video_preview_image(url));
  }

  // ── Social classification ───────────────────────────────────────────────

  #[test]
  fn classification_is_case_insensitive_substring() {
    assert_eq!(classify_platform("Instagram"), SocialCategory::Instagram);
    assert_eq!(classify_platform("my LINKEDIN"), SocialCategory::LinkedIn);
    assert_eq!(classify_platform("Twitter"), SocialCategory::Twitter);
    assert_eq!(classify_platform("X"), SocialCategory::Twitter);
    assert_eq!(classify_platform("GitHub"), SocialCategory::GitHub);
  }

  #[test]
  fn unknown_platform_is_generic() {
    assert_eq!(classify_platform("Mastodon"), SocialCategory::Generic);
    // Containing an `x` is not enough to be Twitter.
    assert_eq!(classify_platform("Xing"), SocialCategory::Generic);
  }

  // ── Contact hints ───────────────────────────────────────────────────────

  #[test]
  fn mobile_and_email_derive_hrefs() {
    assert_eq!(
      contact_href("MOBILE", "+31612345678").as_deref(),
      Some("tel:+31612345678"),
    );
    assert_eq!(
      contact_href("email", "a@example.com").as_deref(),
      Some("mailto:a@example.com"),
    );
    assert!(contact_href("ADDRESS", "1 Main St").is_none());
  }
}
