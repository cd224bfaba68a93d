//! [`SqliteStore`] — the SQLite implementation of [`ClientStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use contacts_core::{
  client::{Client, ClientId, ClientPatch, ClientRecord, NewClient},
  outcome::{Missing, Outcome, Status},
  store::ClientStore,
};

use crate::{
  rows::{CLIENT_COLUMNS, PHONE_COLUMNS, client_from_row, phone_from_row},
  schema::{CONNECTION_SETUP, CREATE_TABLES, DROP_TABLES, FILE_SETUP},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A client store backed by a single SQLite database.
///
/// The connection is owned by the store and closed when the last clone is
/// dropped. Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a database file at `path`.
  ///
  /// The schema is not created here; call [`ClientStore::create_schema`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.configure(true).await?;
    tracing::debug!(path = %path.display(), "opened client store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.configure(false).await?;
    Ok(store)
  }

  /// Close the connection, reporting any error SQLite raises while doing so.
  ///
  /// Dropping the store also closes it, silently.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn configure(&self, file_backed: bool) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(CONNECTION_SETUP)?;
        if file_backed {
          conn.execute_batch(FILE_SETUP)?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

/// Whether a client row with `client_id` exists.
fn client_exists(conn: &rusqlite::Connection, client_id: ClientId) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM client WHERE client_id = ?1",
        rusqlite::params![client_id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── ClientStore impl ────────────────────────────────────────────────────────

impl ClientStore for SqliteStore {
  type Error = Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  async fn create_schema(&self) -> Result<Status> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_TABLES)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!("client and phone tables ready");
    Ok(Status::SchemaCreated)
  }

  async fn drop_schema(&self) -> Result<Status> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(DROP_TABLES)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!("client and phone tables dropped");
    Ok(Status::SchemaDropped)
  }

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn find_client_by_attributes(
    &self,
    name: &str,
    surname: &str,
    email: &str,
  ) -> Result<Outcome<ClientId>> {
    let (name, surname, email) = (name.to_owned(), surname.to_owned(), email.to_owned());

    let id: Option<ClientId> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT client_id FROM client
               WHERE name = ?1 AND surname = ?2 AND email = ?3
               ORDER BY client_id
               LIMIT 1",
              rusqlite::params![name, surname, email],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(Outcome::from_option(id, Missing::ClientWithAttributes))
  }

  async fn add_client(&self, client: NewClient) -> Result<ClientId> {
    let phone_count = client.phones.len();

    let client_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO client (name, surname, email) VALUES (?1, ?2, ?3)",
          rusqlite::params![client.name, client.surname, client.email],
        )?;
        let client_id = tx.last_insert_rowid();

        {
          let mut stmt =
            tx.prepare("INSERT INTO phone (number, client_id) VALUES (?1, ?2)")?;
          for number in &client.phones {
            stmt.execute(rusqlite::params![number, client_id])?;
          }
        }

        tx.commit()?;
        Ok(client_id)
      })
      .await?;

    tracing::debug!(client_id, phone_count, "client added");
    Ok(client_id)
  }

  async fn update_client(&self, client_id: ClientId, patch: ClientPatch) -> Result<Status> {
    let patch = patch.normalized();
    if patch.is_empty() {
      return Ok(Status::NothingToChange);
    }

    // One autocommitted statement per field.
    let changes: Vec<(&'static str, String)> = [
      ("name", patch.name),
      ("surname", patch.surname),
      ("email", patch.email),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|v| (column, v)))
    .collect();

    let rows = self
      .conn
      .call(move |conn| {
        let mut rows = 0;
        for (column, value) in changes {
          rows += conn.execute(
            &format!("UPDATE client SET {column} = ?1 WHERE client_id = ?2"),
            rusqlite::params![value, client_id],
          )?;
        }
        Ok(rows)
      })
      .await?;

    tracing::debug!(client_id, rows, "client updated");
    Ok(Status::ClientChanged)
  }

  async fn delete_client(&self, client_id: ClientId) -> Result<Outcome<Status>> {
    let deleted: Option<usize> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !client_exists(&tx, client_id)? {
          return Ok(None);
        }
        let phones = tx.execute(
          "DELETE FROM phone WHERE client_id = ?1",
          rusqlite::params![client_id],
        )?;
        tx.execute(
          "DELETE FROM client WHERE client_id = ?1",
          rusqlite::params![client_id],
        )?;
        tx.commit()?;
        Ok(Some(phones))
      })
      .await?;

    match deleted {
      Some(phones) => {
        tracing::debug!(client_id, phones, "client deleted");
        Ok(Outcome::Found(Status::ClientDeleted { client_id }))
      }
      None => Ok(Outcome::NotFound(Missing::ClientId { client_id })),
    }
  }

  async fn get_client(&self, client_id: ClientId) -> Result<Option<ClientRecord>> {
    let record = self
      .conn
      .call(move |conn| {
        let client = conn
          .query_row(
            &format!("SELECT {CLIENT_COLUMNS} FROM client WHERE client_id = ?1"),
            rusqlite::params![client_id],
            client_from_row,
          )
          .optional()?;

        let Some(client) = client else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "SELECT {PHONE_COLUMNS} FROM phone WHERE client_id = ?1 ORDER BY phone_id"
        ))?;
        let phones = stmt
          .query_map(rusqlite::params![client_id], phone_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(ClientRecord { client, phones }))
      })
      .await?;

    Ok(record)
  }

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let clients = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CLIENT_COLUMNS} FROM client ORDER BY client_id"))?;
        let rows = stmt
          .query_map([], client_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(clients)
  }

  // ── Phones ────────────────────────────────────────────────────────────────

  async fn find_client_by_phone(&self, number: &str) -> Result<Outcome<String>> {
    let number = number.to_owned();

    let full_name: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT c.name || ' ' || c.surname
               FROM phone p
               INNER JOIN client c ON c.client_id = p.client_id
               WHERE p.number = ?1
               ORDER BY p.phone_id
               LIMIT 1",
              rusqlite::params![number],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(Outcome::from_option(full_name, Missing::ClientWithPhone))
  }

  async fn add_phone_to_client(
    &self,
    client_id: ClientId,
    number: &str,
  ) -> Result<Outcome<Status>> {
    let number = number.to_owned();

    let added = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !client_exists(&tx, client_id)? {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO phone (number, client_id) VALUES (?1, ?2)",
          rusqlite::params![number, client_id],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !added {
      return Ok(Outcome::NotFound(Missing::ClientId { client_id }));
    }
    tracing::debug!(client_id, "phone added");
    Ok(Outcome::Found(Status::PhoneAdded { client_id }))
  }

  async fn delete_phone(&self, client_id: ClientId, number: &str) -> Result<Outcome<Status>> {
    let number = number.to_owned();
    let lookup = number.clone();

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let phone_id: Option<i64> = tx
          .query_row(
            "SELECT phone_id FROM phone
             WHERE number = ?1 AND client_id = ?2
             ORDER BY phone_id
             LIMIT 1",
            rusqlite::params![lookup, client_id],
            |row| row.get(0),
          )
          .optional()?;

        let Some(phone_id) = phone_id else {
          return Ok(false);
        };
        tx.execute("DELETE FROM phone WHERE phone_id = ?1", rusqlite::params![phone_id])?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !deleted {
      return Ok(Outcome::NotFound(Missing::Phone { number }));
    }
    tracing::debug!(client_id, %number, "phone deleted");
    Ok(Outcome::Found(Status::PhoneDeleted { client_id, number }))
  }
}
