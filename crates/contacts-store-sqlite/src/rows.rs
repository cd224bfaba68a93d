//! Row decoding from SQLite result rows into core types.
//!
//! Each helper expects the columns in the order of its `*_COLUMNS` constant.

use contacts_core::client::{Client, Phone};
use rusqlite::Row;

pub const CLIENT_COLUMNS: &str = "client_id, name, surname, email";

pub const PHONE_COLUMNS: &str = "phone_id, number, client_id";

pub fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
  Ok(Client {
    client_id: row.get(0)?,
    name:      row.get(1)?,
    surname:   row.get(2)?,
    email:     row.get(3)?,
  })
}

pub fn phone_from_row(row: &Row<'_>) -> rusqlite::Result<Phone> {
  Ok(Phone {
    phone_id:  row.get(0)?,
    number:    row.get(1)?,
    client_id: row.get(2)?,
  })
}
