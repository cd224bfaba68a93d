//! The `ClientStore` trait.
//!
//! Implemented by storage backends (e.g. `contacts-store-sqlite`). The CLI
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  client::{Client, ClientId, ClientPatch, ClientRecord, NewClient},
  outcome::{Outcome, Status},
};

/// Schema lifecycle and CRUD over clients and their phones.
///
/// "Not found" is reported through [`Outcome::NotFound`]; `Err` is reserved
/// for backend failures. Every mutating method has committed its writes by
/// the time its future resolves.
pub trait ClientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create both tables if they are absent. Idempotent.
  fn create_schema(&self) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Delete all rows and drop both tables.
  ///
  /// There is no existence check: dropping an absent schema is an error.
  fn drop_schema(&self) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  // ── Clients ───────────────────────────────────────────────────────────

  /// Exact match on all three fields. Returns the lowest matching id.
  fn find_client_by_attributes<'a>(
    &'a self,
    name: &'a str,
    surname: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<Outcome<ClientId>, Self::Error>> + Send + 'a;

  /// Insert a client and one phone row per supplied number, atomically.
  fn add_client(
    &self,
    client: NewClient,
  ) -> impl Future<Output = Result<ClientId, Self::Error>> + Send + '_;

  /// Apply each supplied field of `patch` as its own update.
  ///
  /// The id is not verified: an unknown id changes nothing and still reports
  /// [`Status::ClientChanged`]. An empty patch reports
  /// [`Status::NothingToChange`].
  fn update_client(
    &self,
    client_id: ClientId,
    patch: ClientPatch,
  ) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Delete a client's phones, then the client.
  fn delete_client(
    &self,
    client_id: ClientId,
  ) -> impl Future<Output = Result<Outcome<Status>, Self::Error>> + Send + '_;

  /// Retrieve a client and its phones. Returns `None` if not found.
  fn get_client(
    &self,
    client_id: ClientId,
  ) -> impl Future<Output = Result<Option<ClientRecord>, Self::Error>> + Send + '_;

  /// All clients, ordered by id.
  fn list_clients(&self) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  // ── Phones ────────────────────────────────────────────────────────────

  /// Resolve a phone number to its owner's `"name surname"`.
  fn find_client_by_phone<'a>(
    &'a self,
    number: &'a str,
  ) -> impl Future<Output = Result<Outcome<String>, Self::Error>> + Send + 'a;

  /// Attach a number to an existing client.
  fn add_phone_to_client<'a>(
    &'a self,
    client_id: ClientId,
    number: &'a str,
  ) -> impl Future<Output = Result<Outcome<Status>, Self::Error>> + Send + 'a;

  /// Delete the first phone of `client_id` carrying `number`.
  fn delete_phone<'a>(
    &'a self,
    client_id: ClientId,
    number: &'a str,
  ) -> impl Future<Output = Result<Outcome<Status>, Self::Error>> + Send + 'a;
}
