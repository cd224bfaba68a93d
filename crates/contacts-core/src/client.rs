//! Client and phone records.
//!
//! A client owns zero or more phones. Identifiers are assigned by the store.

use serde::{Deserialize, Serialize};

pub type ClientId = i64;
pub type PhoneId = i64;

/// A persisted client row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub client_id: ClientId,
  pub name:      String,
  pub surname:   String,
  pub email:     String,
}

impl Client {
  /// `"name surname"`, the form returned by phone lookups.
  pub fn full_name(&self) -> String { format!("{} {}", self.name, self.surname) }
}

/// A persisted phone row. Numbers are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
  pub phone_id:  PhoneId,
  pub number:    String,
  pub client_id: ClientId,
}

/// Input for [`ClientStore::add_client`](crate::store::ClientStore::add_client).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
  pub name:    String,
  pub surname: String,
  pub email:   String,
  /// Inserted in order, one phone row each.
  #[serde(default)]
  pub phones:  Vec<String>,
}

impl NewClient {
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      name:    name.into(),
      surname: surname.into(),
      email:   email.into(),
      phones:  Vec::new(),
    }
  }

  pub fn with_phones<I, P>(mut self, phones: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<String>,
  {
    self.phones.extend(phones.into_iter().map(Into::into));
    self
  }
}

/// Field changes for [`ClientStore::update_client`](crate::store::ClientStore::update_client).
///
/// A field that is `None` or an empty string is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPatch {
  pub name:    Option<String>,
  pub surname: Option<String>,
  pub email:   Option<String>,
}

impl ClientPatch {
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn surname(mut self, surname: impl Into<String>) -> Self {
    self.surname = Some(surname.into());
    self
  }

  pub fn email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  /// Drop fields that carry an empty string.
  pub fn normalized(self) -> Self {
    let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
    Self {
      name:    keep(self.name),
      surname: keep(self.surname),
      email:   keep(self.email),
    }
  }

  /// True when no field would be written.
  pub fn is_empty(&self) -> bool {
    [&self.name, &self.surname, &self.email]
      .iter()
      .all(|v| v.as_deref().is_none_or(str::is_empty))
  }
}

/// A client together with its phones, ordered by `phone_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
  pub client: Client,
  pub phones: Vec<Phone>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_patch_is_empty() {
    assert!(ClientPatch::default().is_empty());
  }

  #[test]
  fn empty_strings_do_not_count_as_changes() {
    let patch = ClientPatch::default().name("").email("");
    assert!(patch.is_empty());
    assert_eq!(patch.normalized(), ClientPatch::default());
  }

  #[test]
  fn normalized_keeps_supplied_fields() {
    let patch = ClientPatch::default().name("Sergei").surname("").normalized();
    assert!(!patch.is_empty());
    assert_eq!(patch.name.as_deref(), Some("Sergei"));
    assert_eq!(patch.surname, None);
    assert_eq!(patch.email, None);
  }

  #[test]
  fn new_client_collects_phones_in_order() {
    let nc = NewClient::new("Serg", "Galch", "eee@mail.ru").with_phones(["789456", "98456"]);
    assert_eq!(nc.phones, ["789456", "98456"]);
  }

  #[test]
  fn record_serializes_as_nested_json() {
    let record = ClientRecord {
      client: Client {
        client_id: 7,
        name:      "Serg".into(),
        surname:   "Galch".into(),
        email:     "eee@mail.ru".into(),
      },
      phones: vec![Phone { phone_id: 1, number: "789456".into(), client_id: 7 }],
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["client"]["client_id"], 7);
    assert_eq!(json["phones"][0]["number"], "789456");
    assert_eq!(record.client.full_name(), "Serg Galch");
  }
}
