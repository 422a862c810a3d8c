//! [`SqliteStore`] — the SQLite implementation of the store traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use carte_core::{
  card::{CardInput, CardView, ContactDetail, SocialLink, WebLink},
  store::{CardStore, CredentialStore},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{RawCard, RawCardView, RawUser, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Carte store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialized onto one connection thread, so a multi-statement closure
/// can never observe another call's intermediate state.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    email:         row.get(1)?,
    name:          row.get(2)?,
    password_hash: row.get(3)?,
    created_at:    row.get(4)?,
  })
}

const CARD_COLUMNS: &str = "card_id, user_id, name, heading, description, \
                            job_title, company_name, video_url, created_at, \
                            updated_at";

fn card_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCard> {
  Ok(RawCard {
    card_id:      row.get(0)?,
    user_id:      row.get(1)?,
    name:         row.get(2)?,
    heading:      row.get(3)?,
    description:  row.get(4)?,
    job_title:    row.get(5)?,
    company_name: row.get(6)?,
    video_url:    row.get(7)?,
    created_at:   row.get(8)?,
    updated_at:   row.get(9)?,
  })
}

/// Read the full aggregate for `user_id` on the given connection (or
/// transaction, via deref). Children come back in `position` order.
fn read_aggregate(
  conn: &rusqlite::Connection,
  user_id: &str,
) -> rusqlite::Result<Option<RawCardView>> {
  let card = conn
    .query_row(
      &format!("SELECT {CARD_COLUMNS} FROM cards WHERE user_id = ?1"),
      rusqlite::params![user_id],
      card_from_row,
    )
    .optional()?;

  let Some(card) = card else {
    return Ok(None);
  };

  let mut stmt = conn.prepare(
    "SELECT kind, value FROM contact_details
     WHERE card_id = ?1 ORDER BY position",
  )?;
  let contact_details = stmt
    .query_map(rusqlite::params![card.card_id], |row| {
      Ok(ContactDetail { kind: row.get(0)?, value: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut stmt = conn.prepare(
    "SELECT platform, url FROM social_links
     WHERE card_id = ?1 ORDER BY position",
  )?;
  let social_links = stmt
    .query_map(rusqlite::params![card.card_id], |row| {
      Ok(SocialLink { platform: row.get(0)?, url: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut stmt = conn.prepare(
    "SELECT title, url FROM web_links
     WHERE card_id = ?1 ORDER BY position",
  )?;
  let web_links = stmt
    .query_map(rusqlite::params![card.card_id], |row| {
      Ok(WebLink { title: row.get(0)?, url: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(Some(RawCardView { card, contact_details, social_links, web_links }))
}

// ─── Child inserts ───────────────────────────────────────────────────────────

fn insert_contact_details(
  tx: &rusqlite::Transaction<'_>,
  card_id: &str,
  details: &[ContactDetail],
) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(
    "INSERT INTO contact_details (detail_id, card_id, position, kind, value)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (position, detail) in details.iter().enumerate() {
    stmt.execute(rusqlite::params![
      encode_uuid(Uuid::new_v4()),
      card_id,
      position as i64,
      detail.kind,
      detail.value,
    ])?;
  }
  Ok(())
}

fn insert_social_links(
  tx: &rusqlite::Transaction<'_>,
  card_id: &str,
  links: &[SocialLink],
) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(
    "INSERT INTO social_links (link_id, card_id, position, platform, url)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (position, link) in links.iter().enumerate() {
    stmt.execute(rusqlite::params![
      encode_uuid(Uuid::new_v4()),
      card_id,
      position as i64,
      link.platform,
      link.url,
    ])?;
  }
  Ok(())
}

fn insert_web_links(
  tx: &rusqlite::Transaction<'_>,
  card_id: &str,
  links: &[WebLink],
) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(
    "INSERT INTO web_links (link_id, card_id, position, title, url)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (position, link) in links.iter().enumerate() {
    stmt.execute(rusqlite::params![
      encode_uuid(Uuid::new_v4()),
      card_id,
      position as i64,
      link.title,
      link.url,
    ])?;
  }
  Ok(())
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  async fn create_user(&self, input: NewUser) -> carte_core::Result<User> {
    let user = User {
      user_id:       Uuid::new_v4(),
      email:         input.email,
      name:          input.name,
      password_hash: input.password_hash,
      created_at:    Utc::now(),
    };

    let id_str = encode_uuid(user.user_id);
    let at_str = encode_dt(user.created_at);
    let email  = user.email.clone();
    let name   = user.name.clone();
    let hash   = user.password_hash.clone();

    // Check-then-insert runs on the single serialized connection, so no
    // other call can slip in between; the UNIQUE constraint is the backstop.
    let inserted: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken: bool = tx
          .query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO users (user_id, email, name, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, email, name, hash, at_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await
      .map_err(Error::Database)?;

    if !inserted {
      return Err(Error::EmailTaken.into());
    }
    Ok(user)
  }

  async fn get_user_by_email(
    &self,
    email: &str,
  ) -> carte_core::Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, email, name, password_hash, created_at
               FROM users WHERE email = ?1",
              rusqlite::params![email],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawUser::into_user).transpose()?)
  }

  async fn get_user(&self, id: Uuid) -> carte_core::Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, email, name, password_hash, created_at
               FROM users WHERE user_id = ?1",
              rusqlite::params![id_str],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawUser::into_user).transpose()?)
  }
}

// ─── CardStore impl ──────────────────────────────────────────────────────────

impl CardStore for SqliteStore {
  async fn create_card(
    &self,
    user_id: Uuid,
    input: CardInput,
  ) -> carte_core::Result<CardView> {
    let card_id_str = encode_uuid(Uuid::new_v4());
    let user_id_str = encode_uuid(user_id);
    let now_str     = encode_dt(Utc::now());

    let raw: Option<RawCardView> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM cards WHERE user_id = ?1",
            rusqlite::params![user_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if exists {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO cards (
             card_id, user_id, name, heading, description,
             job_title, company_name, video_url, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            card_id_str,
            user_id_str,
            input.name,
            input.heading,
            input.description,
            input.job_title,
            input.company_name,
            input.video_url,
            now_str,
            now_str,
          ],
        )?;

        // On create an absent collection is the same as an empty one.
        insert_contact_details(
          &tx,
          &card_id_str,
          input.contact_details.as_deref().unwrap_or(&[]),
        )?;
        insert_social_links(
          &tx,
          &card_id_str,
          input.social_links.as_deref().unwrap_or(&[]),
        )?;
        insert_web_links(
          &tx,
          &card_id_str,
          input.web_links.as_deref().unwrap_or(&[]),
        )?;

        let raw = read_aggregate(&tx, &user_id_str)?
          .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(Error::Database)?;

    match raw {
      None => Err(Error::CardExists(user_id).into()),
      Some(raw) => Ok(raw.into_view()?),
    }
  }

  async fn get_card(
    &self,
    user_id: Uuid,
  ) -> carte_core::Result<Option<CardView>> {
    let user_id_str = encode_uuid(user_id);

    let raw: Option<RawCardView> = self
      .conn
      .call(move |conn| Ok(read_aggregate(conn, &user_id_str)?))
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawCardView::into_view).transpose()?)
  }

  async fn update_card(
    &self,
    user_id: Uuid,
    input: CardInput,
  ) -> carte_core::Result<CardView> {
    let user_id_str = encode_uuid(user_id);
    let now_str     = encode_dt(Utc::now());

    let raw: Option<RawCardView> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let card_id: Option<String> = tx
          .query_row(
            "SELECT card_id FROM cards WHERE user_id = ?1",
            rusqlite::params![user_id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(card_id) = card_id else {
          return Ok(None);
        };

        // Scalars are overwritten unconditionally — an absent optional in
        // the payload clears the column.
        tx.execute(
          "UPDATE cards SET
             name = ?1, heading = ?2, description = ?3, job_title = ?4,
             company_name = ?5, video_url = ?6, updated_at = ?7
           WHERE card_id = ?8",
          rusqlite::params![
            input.name,
            input.heading,
            input.description,
            input.job_title,
            input.company_name,
            input.video_url,
            now_str,
            card_id,
          ],
        )?;

        // Each collection independently: payload key present (even as an
        // empty list) replaces wholesale; absent leaves the rows untouched.
        if let Some(details) = input.contact_details {
          tx.execute(
            "DELETE FROM contact_details WHERE card_id = ?1",
            rusqlite::params![card_id],
          )?;
          insert_contact_details(&tx, &card_id, &details)?;
        }
        if let Some(links) = input.social_links {
          tx.execute(
            "DELETE FROM social_links WHERE card_id = ?1",
            rusqlite::params![card_id],
          )?;
          insert_social_links(&tx, &card_id, &links)?;
        }
        if let Some(links) = input.web_links {
          tx.execute(
            "DELETE FROM web_links WHERE card_id = ?1",
            rusqlite::params![card_id],
          )?;
          insert_web_links(&tx, &card_id, &links)?;
        }

        let raw = read_aggregate(&tx, &user_id_str)?
          .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(Error::Database)?;

    match raw {
      None => Err(Error::CardNotFound(user_id).into()),
      Some(raw) => Ok(raw.into_view()?),
    }
  }
}
