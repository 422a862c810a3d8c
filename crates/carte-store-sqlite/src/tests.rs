//! Integration tests for `SqliteStore` against an in-memory database.

use carte_core::{
  Error,
  card::{CardInput, ContactDetail, SocialLink, WebLink},
  store::{CardStore, CredentialStore},
  user::NewUser,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(email: &str) -> NewUser {
  NewUser {
    email:         email.into(),
    name:          "Alice Liddell".into(),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
  }
}

fn contact(kind: &str, value: &str) -> ContactDetail {
  ContactDetail { kind: kind.into(), value: value.into() }
}

fn social(platform: &str, url: &str) -> SocialLink {
  SocialLink { platform: platform.into(), url: url.into() }
}

fn web(title: &str, url: &str) -> WebLink {
  WebLink { title: title.into(), url: url.into() }
}

fn card_input(name: &str) -> CardInput {
  CardInput { name: name.into(), ..Default::default() }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;

  let user = s.create_user(new_user("alice@example.com")).await.unwrap();
  assert_eq!(user.email, "alice@example.com");

  let by_id = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(by_id.user_id, user.user_id);
  assert_eq!(by_id.password_hash, user.password_hash);

  let by_email = s
    .get_user_by_email("alice@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(by_email.user_id, user.user_id);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
  assert!(
    s.get_user_by_email("nobody@example.com")
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn email_lookup_is_case_sensitive() {
  let s = store().await;
  s.create_user(new_user("Alice@example.com")).await.unwrap();

  assert!(
    s.get_user_by_email("alice@example.com")
      .await
      .unwrap()
      .is_none()
  );
  assert!(
    s.get_user_by_email("Alice@example.com")
      .await
      .unwrap()
      .is_some()
  );
}

#[tokio::test]
async fn duplicate_email_conflicts_and_leaves_record_unchanged() {
  let s = store().await;
  let original = s.create_user(new_user("alice@example.com")).await.unwrap();

  let mut second = new_user("alice@example.com");
  second.name = "Impostor".into();
  second.password_hash = "$argon2id$v=19$other".into();

  let err = s.create_user(second).await.unwrap_err();
  assert!(matches!(err, Error::EmailTaken));

  // The stored record is untouched by the failed attempt.
  let stored = s
    .get_user_by_email("alice@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.user_id, original.user_id);
  assert_eq!(stored.name, original.name);
  assert_eq!(stored.password_hash, original.password_hash);
}

// ─── Card creation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_card_and_read_roundtrip() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  let input = CardInput {
    name:            "Alice Liddell".into(),
    heading:         Some("Down the rabbit hole".into()),
    job_title:       Some("Engineer".into()),
    contact_details: Some(vec![
      contact("MOBILE", "+31612345678"),
      contact("EMAIL", "alice@example.com"),
    ]),
    social_links:    Some(vec![social(
      "GitHub",
      "https://github.com/alice",
    )]),
    web_links:       Some(vec![web("Portfolio", "https://alice.example")]),
    ..Default::default()
  };

  let created = s.create_card(user.user_id, input).await.unwrap();
  assert_eq!(created.card.user_id, user.user_id);
  assert_eq!(created.card.name, "Alice Liddell");
  assert_eq!(created.card.heading.as_deref(), Some("Down the rabbit hole"));
  assert_eq!(created.contact_details.len(), 2);
  assert_eq!(created.contact_details[0].kind, "MOBILE");
  assert_eq!(created.social_links.len(), 1);
  assert_eq!(created.web_links.len(), 1);

  // Re-read returns the identical aggregate, children in creation order.
  let read = s.get_card(user.user_id).await.unwrap().unwrap();
  assert_eq!(read.card.card_id, created.card.card_id);
  assert_eq!(read.contact_details, created.contact_details);
  assert_eq!(read.social_links, created.social_links);
  assert_eq!(read.web_links, created.web_links);
}

#[tokio::test]
async fn create_card_without_collections_yields_empty() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  let view = s
    .create_card(user.user_id, card_input("Alice"))
    .await
    .unwrap();
  assert!(view.contact_details.is_empty());
  assert!(view.social_links.is_empty());
  assert!(view.web_links.is_empty());
}

#[tokio::test]
async fn second_create_conflicts_and_first_card_is_unmodified() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  let first = s
    .create_card(user.user_id, CardInput {
      name: "First".into(),
      contact_details: Some(vec![contact("EMAIL", "a@example.com")]),
      ..Default::default()
    })
    .await
    .unwrap();

  let err = s
    .create_card(user.user_id, card_input("Second"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CardExists(id) if id == user.user_id));

  let read = s.get_card(user.user_id).await.unwrap().unwrap();
  assert_eq!(read.card.card_id, first.card.card_id);
  assert_eq!(read.card.name, "First");
  assert_eq!(read.contact_details.len(), 1);
}

#[tokio::test]
async fn get_card_missing_returns_none() {
  let s = store().await;
  assert!(s.get_card(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Card update ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_missing_card_errors_without_side_effects() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  let err = s
    .update_card(user.user_id, card_input("Ghost"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CardNotFound(id) if id == user.user_id));
  assert!(s.get_card(user.user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_scalars_unconditionally() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  s.create_card(user.user_id, CardInput {
    name:         "Alice".into(),
    heading:      Some("Old heading".into()),
    company_name: Some("Acme".into()),
    video_url:    Some("https://youtu.be/dQw4w9WgXcQ".into()),
    ..Default::default()
  })
  .await
  .unwrap();

  // The update payload omits heading/company/video — they must be cleared,
  // not preserved.
  let updated = s
    .update_card(user.user_id, CardInput {
      name:      "Alice L.".into(),
      job_title: Some("Engineer".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.card.name, "Alice L.");
  assert_eq!(updated.card.job_title.as_deref(), Some("Engineer"));
  assert!(updated.card.heading.is_none());
  assert!(updated.card.company_name.is_none());
  assert!(updated.card.video_url.is_none());
}

#[tokio::test]
async fn update_replaces_only_collections_present_in_payload() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();

  // Start: 2 contact details, 1 social link, 0 web links.
  s.create_card(user.user_id, CardInput {
    name:            "Alice".into(),
    contact_details: Some(vec![
      contact("MOBILE", "+31611111111"),
      contact("EMAIL", "old@example.com"),
    ]),
    social_links:    Some(vec![social(
      "LinkedIn",
      "https://linkedin.com/in/alice",
    )]),
    ..Default::default()
  })
  .await
  .unwrap();

  // Update: a new 3-element contact list, no socialLinks key, and an
  // explicitly empty webLinks list.
  let updated = s
    .update_card(user.user_id, CardInput {
      name:            "Alice".into(),
      contact_details: Some(vec![
        contact("MOBILE", "+31622222222"),
        contact("EMAIL", "new@example.com"),
        contact("ADDRESS", "1 Wonderland Lane"),
      ]),
      social_links:    None,
      web_links:       Some(vec![]),
      ..Default::default()
    })
    .await
    .unwrap();

  // 3 new contact rows, the old 2 gone.
  assert_eq!(updated.contact_details.len(), 3);
  assert_eq!(updated.contact_details[0].value, "+31622222222");
  assert_eq!(updated.contact_details[2].kind, "ADDRESS");
  // The original social link untouched.
  assert_eq!(updated.social_links.len(), 1);
  assert_eq!(updated.social_links[0].platform, "LinkedIn");
  // Web links cleared by the empty list.
  assert!(updated.web_links.is_empty());

  // A fresh read reflects exactly the same state.
  let read = s.get_card(user.user_id).await.unwrap().unwrap();
  assert_eq!(read.contact_details, updated.contact_details);
  assert_eq!(read.social_links, updated.social_links);
  assert_eq!(read.web_links, updated.web_links);
}

#[tokio::test]
async fn replaced_collection_preserves_payload_order() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();
  s.create_card(user.user_id, card_input("Alice")).await.unwrap();

  let links = vec![
    web("Third", "https://c.example"),
    web("First", "https://a.example"),
    web("Second", "https://b.example"),
  ];
  let updated = s
    .update_card(user.user_id, CardInput {
      name: "Alice".into(),
      web_links: Some(links.clone()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.web_links, links);
}

#[tokio::test]
async fn concurrent_updates_end_in_exactly_one_payload() {
  let s = store().await;
  let user = s.create_user(new_user("alice@example.com")).await.unwrap();
  s.create_card(user.user_id, card_input("Start")).await.unwrap();

  let payload_a = CardInput {
    name:            "Writer A".into(),
    contact_details: Some(vec![contact("EMAIL", "a@example.com")]),
    social_links:    Some(vec![social("GitHub", "https://github.com/a")]),
    ..Default::default()
  };
  let payload_b = CardInput {
    name:            "Writer B".into(),
    contact_details: Some(vec![
      contact("MOBILE", "+31600000001"),
      contact("MOBILE", "+31600000002"),
    ]),
    social_links:    Some(vec![]),
    ..Default::default()
  };

  let (sa, sb) = (s.clone(), s.clone());
  let (ida, idb) = (user.user_id, user.user_id);
  let (a, b) = tokio::join!(
    tokio::spawn(async move { sa.update_card(ida, payload_a).await }),
    tokio::spawn(async move { sb.update_card(idb, payload_b).await }),
  );
  a.unwrap().unwrap();
  b.unwrap().unwrap();

  // Last writer wins, but always with its whole payload — never a mixture
  // of scalars from one call and children from the other.
  let read = s.get_card(user.user_id).await.unwrap().unwrap();
  let is_a = read.card.name == "Writer A"
    && read.contact_details.len() == 1
    && read.social_links.len() == 1;
  let is_b = read.card.name == "Writer B"
    && read.contact_details.len() == 2
    && read.social_links.is_empty();
  assert!(is_a || is_b, "interleaved state: {read:?}");
}
