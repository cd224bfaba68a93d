//! The sample session: rebuild the schema, add one client and walk it
//! through every operation.

use anyhow::Context as _;
use contacts_core::{
  client::{ClientPatch, NewClient},
  outcome::Status,
  store::ClientStore,
};

/// Run the session and return one status line per step.
///
/// The schema is dropped and recreated, so any existing data is lost.
pub async fn run<S: ClientStore>(store: &S) -> anyhow::Result<Vec<String>> {
  let mut lines = Vec::new();

  lines.push(store.create_schema().await.context("create schema")?.to_string());
  lines.push(store.drop_schema().await.context("drop schema")?.to_string());
  lines.push(store.create_schema().await.context("recreate schema")?.to_string());

  let client_id = store
    .add_client(NewClient::new("Serg", "Galch", "eee@mail.ru").with_phones(["789456", "98456"]))
    .await
    .context("add client")?;
  lines.push(Status::ClientAdded { client_id }.to_string());

  let owner = store
    .find_client_by_phone("789456")
    .await
    .context("find client by phone")?;
  lines.push(format!("Client which has phone 789456 is {owner}"));

  lines.push(
    store
      .find_client_by_attributes("No", "Found", "eee@mail.ru")
      .await
      .context("find client by attributes")?
      .to_string(),
  );

  let found = store
    .find_client_by_attributes("Serg", "Galch", "eee@mail.ru")
    .await
    .context("find client by attributes")?;

  let Some(client_id) = found.found() else {
    tracing::warn!("freshly added client could not be found again");
    return Ok(lines);
  };

  lines.push(
    store
      .add_phone_to_client(client_id, "741147")
      .await
      .context("add phone")?
      .to_string(),
  );

  let changed = ClientPatch::default()
    .name("Sergei")
    .surname("Galchin")
    .email("some@yandex.ru");
  lines.push(store.update_client(client_id, changed).await.context("update client")?.to_string());

  let reverted = ClientPatch::default()
    .name("Serg")
    .surname("Galch")
    .email("eee@mail.ru");
  lines.push(store.update_client(client_id, reverted).await.context("revert client")?.to_string());

  for number in ["741147", "321"] {
    lines.push(
      store
        .delete_phone(client_id, number)
        .await
        .context("delete phone")?
        .to_string(),
    );
  }

  lines.push(
    store
      .delete_client(client_id)
      .await
      .context("delete client")?
      .to_string(),
  );

  Ok(lines)
}
