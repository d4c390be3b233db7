//! The SQLite implementation of [`ShowStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tvmaze_core::{
  page::ShowPage,
  show::{Show, ShowId},
  store::ShowStore,
};

use crate::{
  encode::{RawPerson, RawShow},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A show catalog backed by a single SQLite file.
///
/// Clones share one underlying connection.
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

  /// Open a private in-memory store.
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

  /// Apply one show inside its own transaction.
  async fn merge_one(&self, raw: RawShow) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO shows (show_id, name) VALUES (?1, ?2)
           ON CONFLICT (show_id) DO UPDATE SET name = excluded.name",
          rusqlite::params![raw.show_id, raw.name],
        )?;

        tx.execute(
          "DELETE FROM show_cast WHERE show_id = ?1",
          rusqlite::params![raw.show_id],
        )?;

        {
          let mut upsert_person = tx.prepare(
            "INSERT INTO persons (person_id, name, birthday) VALUES (?1, ?2, ?3)
             ON CONFLICT (person_id) DO UPDATE
               SET name = excluded.name, birthday = excluded.birthday",
          )?;
          let mut attach = tx.prepare(
            "INSERT INTO show_cast (person_id, show_id) VALUES (?1, ?2)",
          )?;

          for person in &raw.cast {
            upsert_person.execute(rusqlite::params![
              person.person_id,
              person.name,
              person.birthday,
            ])?;
            attach.execute(rusqlite::params![person.person_id, raw.show_id])?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

#[cfg(test)]
impl SqliteStore {
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── Row helpers (run on the database thread) ────────────────────────────────

fn load_cast(
  conn: &rusqlite::Connection,
  show_id: ShowId,
) -> rusqlite::Result<Vec<RawPerson>> {
  let mut stmt = conn.prepare_cached(
    "SELECT p.person_id, p.name, p.birthday
     FROM show_cast c
     JOIN persons p ON p.person_id = c.person_id
     WHERE c.show_id = ?1
     ORDER BY p.birthday IS NULL, p.birthday DESC, p.person_id",
  )?;
  stmt
    .query_map(rusqlite::params![show_id], |row| {
      Ok(RawPerson {
        person_id: row.get(0)?,
        name:      row.get(1)?,
        birthday:  row.get(2)?,
      })
    })?
    .collect()
}

/// Fetch a show row by the given single-row query, then its cast.
fn load_show(
  conn: &rusqlite::Connection,
  sql: &str,
  params: impl rusqlite::Params,
) -> rusqlite::Result<Option<RawShow>> {
  let head: Option<(ShowId, String)> = conn
    .query_row(sql, params, |row| Ok((row.get(0)?, row.get(1)?)))
    .optional()?;

  head
    .map(|(show_id, name)| {
      Ok(RawShow { show_id, name, cast: load_cast(conn, show_id)? })
    })
    .transpose()
}

// ─── ShowStore impl ──────────────────────────────────────────────────────────

impl ShowStore for SqliteStore {
  type Error = crate::Error;

  async fn merge(&self, shows: Vec<Show>) -> Result<()> {
    for show in &shows {
      let raw = RawShow::for_merge(show);
      let cast_len = raw.cast.len();

      if let Err(e) = self.merge_one(raw).await {
        tracing::error!(show_id = show.id, error = %e, "failed to merge show");
        return Err(e);
      }
      tracing::debug!(show_id = show.id, cast = cast_len, "merged show");
    }
    Ok(())
  }

  async fn highest_show(&self) -> Result<Option<Show>> {
    let raw = self
      .conn
      .call(|conn| {
        Ok(load_show(
          conn,
          "SELECT show_id, name FROM shows ORDER BY show_id DESC LIMIT 1",
          rusqlite::params![],
        )?)
      })
      .await?;

    raw.map(RawShow::into_show).transpose()
  }

  async fn get_show(&self, id: ShowId) -> Result<Option<Show>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(load_show(
          conn,
          "SELECT show_id, name FROM shows WHERE show_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    raw.map(RawShow::into_show).transpose()
  }

  async fn list_shows(&self, page: ShowPage) -> Result<Vec<Show>> {
    let limit  = i64::try_from(page.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let raws: Vec<RawShow> = self
      .conn
      .call(move |conn| {
        // One read transaction so the page is a single consistent snapshot.
        let tx = conn.transaction()?;

        let heads = {
          let mut stmt = tx.prepare(
            "SELECT show_id, name FROM shows ORDER BY show_id LIMIT ?1 OFFSET ?2",
          )?;
          stmt
            .query_map(rusqlite::params![limit, offset], |row| {
              Ok((row.get::<_, ShowId>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut rows = Vec::with_capacity(heads.len());
        for (show_id, name) in heads {
          rows.push(RawShow { show_id, name, cast: load_cast(&tx, show_id)? });
        }

        tx.commit()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShow::into_show).collect()
  }
}
