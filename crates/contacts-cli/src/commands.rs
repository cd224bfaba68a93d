//! Subcommands and their dispatch onto a [`ClientStore`].

use anyhow::Context as _;
use clap::{Args, Subcommand};
use contacts_core::{
  client::{ClientId, ClientPatch, NewClient},
  store::ClientStore,
};

use crate::demo;

// ─── Arguments ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Create the client and phone tables if they are absent.
  Init,
  /// Delete all data and drop both tables.
  Drop,
  /// Add a client, optionally with phone numbers.
  Add {
    name:    String,
    surname: String,
    email:   String,
    /// Phone number; repeat for several.
    #[arg(short, long = "phone", value_name = "NUMBER")]
    phones:  Vec<String>,
  },
  /// Look a client up by phone number or by all three attributes.
  Find(FindArgs),
  /// Attach a phone number to an existing client.
  AddPhone { client_id: ClientId, number: String },
  /// Change any of a client's name, surname or email.
  Update {
    client_id: ClientId,
    #[arg(long)]
    name:      Option<String>,
    #[arg(long)]
    surname:   Option<String>,
    #[arg(long)]
    email:     Option<String>,
  },
  /// Delete a client and all of their phones.
  Delete { client_id: ClientId },
  /// Delete one phone number from a client.
  DeletePhone { client_id: ClientId, number: String },
  /// Show a client with their phones.
  Show { client_id: ClientId },
  /// List all clients.
  List,
  /// Run the sample session against the configured database.
  Demo,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct FindArgs {
  #[arg(long, conflicts_with_all = ["name", "surname", "email"])]
  pub phone:   Option<String>,
  #[arg(long, requires_all = ["surname", "email"])]
  pub name:    Option<String>,
  #[arg(long, requires_all = ["name", "email"])]
  pub surname: Option<String>,
  #[arg(long, requires_all = ["name", "surname"])]
  pub email:   Option<String>,
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// Execute `command` and return the text to print.
pub async fn run<S: ClientStore>(store: &S, command: Command, json: bool) -> anyhow::Result<String> {
  let out = match command {
    Command::Init => store.create_schema().await.context("create schema")?.to_string(),

    Command::Drop => store.drop_schema().await.context("drop schema")?.to_string(),

    Command::Add { name, surname, email, phones } => {
      let client_id = store
        .add_client(NewClient::new(name, surname, email).with_phones(phones))
        .await
        .context("add client")?;
      contacts_core::Status::ClientAdded { client_id }.to_string()
    }

    Command::Find(FindArgs { phone: Some(phone), .. }) => store
      .find_client_by_phone(&phone)
      .await
      .context("find client by phone")?
      .to_string(),

    Command::Find(FindArgs { name, surname, email, .. }) => store
      .find_client_by_attributes(
        name.as_deref().unwrap_or_default(),
        surname.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default(),
      )
      .await
      .context("find client by attributes")?
      .to_string(),

    Command::AddPhone { client_id, number } => store
      .add_phone_to_client(client_id, &number)
      .await
      .context("add phone")?
      .to_string(),

    Command::Update { client_id, name, surname, email } => store
      .update_client(client_id, ClientPatch { name, surname, email })
      .await
      .context("update client")?
      .to_string(),

    Command::Delete { client_id } => store
      .delete_client(client_id)
      .await
      .context("delete client")?
      .to_string(),

    Command::DeletePhone { client_id, number } => store
      .delete_phone(client_id, &number)
      .await
      .context("delete phone")?
      .to_string(),

    Command::Show { client_id } => {
      let Some(record) = store.get_client(client_id).await.context("get client")? else {
        return Ok(
          contacts_core::Missing::ClientId { client_id }.to_string(),
        );
      };
      if json {
        serde_json::to_string_pretty(&record)?
      } else {
        let mut out = format!(
          "{}: {} <{}>",
          record.client.client_id,
          record.client.full_name(),
          record.client.email
        );
        for phone in &record.phones {
          out.push_str(&format!("\n  {}", phone.number));
        }
        out
      }
    }

    Command::List => {
      let clients = store.list_clients().await.context("list clients")?;
      if json {
        serde_json::to_string_pretty(&clients)?
      } else {
        clients
          .iter()
          .map(|c| format!("{}: {} <{}>", c.client_id, c.full_name(), c.email))
          .collect::<Vec<_>>()
          .join("\n")
      }
    }

    Command::Demo => demo::run(store).await?.join("\n"),
  };

  Ok(out)
}
