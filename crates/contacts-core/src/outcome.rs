//! Typed results for store operations.
//!
//! Absence is not an error: lookups and targeted mutations return an
//! [`Outcome`], and only database failures surface as `Err`. Both [`Status`]
//! and [`Missing`] render the human-readable status line via `Display`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ClientId;

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Result of an operation whose target may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
  Found(T),
  NotFound(Missing),
}

impl<T> Outcome<T> {
  pub fn is_found(&self) -> bool { matches!(self, Self::Found(_)) }

  pub fn found(self) -> Option<T> {
    match self {
      Self::Found(v) => Some(v),
      Self::NotFound(_) => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    match self {
      Self::Found(v) => Outcome::Found(f(v)),
      Self::NotFound(m) => Outcome::NotFound(m),
    }
  }

  /// Wrap an optional row, reporting `missing` when it is absent.
  pub fn from_option(value: Option<T>, missing: Missing) -> Self {
    match value {
      Some(v) => Self::Found(v),
      None => Self::NotFound(missing),
    }
  }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Found(v) => v.fmt(f),
      Self::NotFound(m) => m.fmt(f),
    }
  }
}

// ─── Missing ─────────────────────────────────────────────────────────────────

/// What a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "missing", rename_all = "snake_case")]
pub enum Missing {
  /// No client matched the (name, surname, email) triple.
  ClientWithAttributes,
  /// No phone row carried the requested number.
  ClientWithPhone,
  ClientId { client_id: ClientId },
  /// No phone with this number belongs to the client.
  Phone { number: String },
}

impl fmt::Display for Missing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ClientWithAttributes => f.write_str("Client with such parameters not found"),
      Self::ClientWithPhone => f.write_str("Client with such phone number not found"),
      Self::ClientId { .. } => f.write_str("Client with such id not found"),
      Self::Phone { number } => write!(f, "Phone {number} not found"),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Successful completion of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
  SchemaCreated,
  SchemaDropped,
  ClientAdded { client_id: ClientId },
  PhoneAdded { client_id: ClientId },
  ClientChanged,
  NothingToChange,
  ClientDeleted { client_id: ClientId },
  PhoneDeleted { client_id: ClientId, number: String },
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::SchemaCreated => f.write_str(r#"Tables "client" and "phone" were created"#),
      Self::SchemaDropped => f.write_str(
        r#"All data was deleted and tables "client" and "phone" were deleted"#,
      ),
      Self::ClientAdded { client_id } => write!(f, "Client was added with id {client_id}"),
      Self::PhoneAdded { client_id } => write!(f, "Phone was added to client {client_id}"),
      Self::ClientChanged => f.write_str("Client's data has been changed"),
      Self::NothingToChange => f.write_str("Nothing to change"),
      Self::ClientDeleted { client_id } => {
        write!(f, "Client {client_id} and their phones have been deleted")
      }
      Self::PhoneDeleted { client_id, number } => write!(
        f,
        "Phone number {number} has been deleted in client with id {client_id}"
      ),
    }
  }
}
