//! `contacts` — command-line front end for the client contact store.
//!
//! # Usage
//!
//! ```
//! contacts init
//! contacts add Serg Galch eee@mail.ru --phone 789456 --phone 98456
//! contacts find --phone 789456
//! contacts --database ~/clients.db list --json
//! ```
//!
//! The database path comes from `--database`, then `CONTACTS_DATABASE_PATH`,
//! then `database_path` in the config file, then `contacts.db`.

mod commands;
mod demo;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use contacts_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "contacts", version, about = "Manage clients and their phone numbers")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "contacts.toml")]
  config: PathBuf,

  /// SQLite database file; overrides the config file.
  #[arg(long, global = true, value_name = "PATH")]
  database: Option<PathBuf>,

  /// Print `show` and `list` results as JSON.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Status lines go to stdout; keep logs quiet unless RUST_LOG asks.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = settings::load(&cli.config)?;
  let database = settings::expand_tilde(cli.database.as_ref().unwrap_or(&cfg.database_path));

  let store = SqliteStore::open(&database)
    .await
    .with_context(|| format!("failed to open store at {database:?}"))?;
  tracing::debug!(database = %database.display(), command = ?cli.command, "running");

  let result = commands::run(&store, cli.command, cli.json).await;
  store.close().await.context("failed to close store")?;

  let out = result?;
  if !out.is_empty() {
    println!("{out}");
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory as _;
  use contacts_core::store::ClientStore;

  use super::*;

  fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("contacts").chain(args.iter().copied()))
  }

  async fn memory_store() -> SqliteStore {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.create_schema().await.unwrap();
    s
  }

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn add_collects_repeated_phones() {
    let cli = parse(&["add", "Serg", "Galch", "eee@mail.ru", "-p", "789456", "--phone", "98456"])
      .unwrap();
    match cli.command {
      Command::Add { phones, .. } => assert_eq!(phones, ["789456", "98456"]),
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn find_needs_phone_or_all_attributes() {
    assert!(parse(&["find"]).is_err());
    assert!(parse(&["find", "--name", "Serg"]).is_err());
    assert!(parse(&["find", "--phone", "1", "--name", "Serg"]).is_err());
    assert!(parse(&["find", "--phone", "1"]).is_ok());
    assert!(parse(&["find", "--name", "a", "--surname", "b", "--email", "c"]).is_ok());
  }

  #[test]
  fn database_flag_and_json() {
    let cli = parse(&["--database", "/tmp/x.db", "list", "--json"]).unwrap();
    assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
    assert!(cli.json);
  }

  #[test]
  fn global_flags_follow_the_subcommand() {
    let cli = parse(&["list", "--database", "/tmp/pdb/x.db", "-c", "other.toml"]).unwrap();
    assert_eq!(cli.database, Some(PathBuf::from("/tmp/pdb/x.db")));
    assert_eq!(cli.config, PathBuf::from("other.toml"));
    assert!(matches!(cli.command, Command::List));

    let cli = parse(&["add", "Ann", "Lee", "ann@example.com", "--database", "a.db"]).unwrap();
    assert_eq!(cli.database, Some(PathBuf::from("a.db")));
    assert_eq!(cli.config, PathBuf::from("contacts.toml"));
  }

  #[tokio::test]
  async fn commands_print_status_lines() {
    let s = memory_store().await;

    let added = commands::run(
      &s,
      parse(&["add", "Serg", "Galch", "eee@mail.ru", "-p", "789456"]).unwrap().command,
      false,
    )
    .await
    .unwrap();
    assert!(added.starts_with("Client was added with id "));

    let found = commands::run(&s, parse(&["find", "--phone", "789456"]).unwrap().command, false)
      .await
      .unwrap();
    assert_eq!(found, "Serg Galch");

    let missing = commands::run(&s, parse(&["delete", "99"]).unwrap().command, false)
      .await
      .unwrap();
    assert_eq!(missing, "Client with such id not found");

    let nothing = commands::run(&s, parse(&["update", "1"]).unwrap().command, false)
      .await
      .unwrap();
    assert_eq!(nothing, "Nothing to change");
  }

  #[tokio::test]
  async fn show_renders_json() {
    let s = memory_store().await;
    commands::run(
      &s,
      parse(&["add", "Ann", "Lee", "ann@example.com", "-p", "555"]).unwrap().command,
      false,
    )
    .await
    .unwrap();

    let out = commands::run(&s, parse(&["show", "1"]).unwrap().command, true)
      .await
      .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["client"]["name"], "Ann");
    assert_eq!(value["phones"][0]["number"], "555");
  }

  #[tokio::test]
  async fn demo_session() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let lines = demo::run(&s).await.unwrap();

    assert_eq!(lines, [
      r#"Tables "client" and "phone" were created"#,
      r#"All data was deleted and tables "client" and "phone" were deleted"#,
      r#"Tables "client" and "phone" were created"#,
      "Client was added with id 1",
      "Client which has phone 789456 is Serg Galch",
      "Client with such parameters not found",
      "Phone was added to client 1",
      "Client's data has been changed",
      "Client's data has been changed",
      "Phone number 741147 has been deleted in client with id 1",
      "Phone 321 not found",
      "Client 1 and their phones have been deleted",
    ]);
    assert!(s.list_clients().await.unwrap().is_empty());
  }
}
