//! Configuration loading for the `contacts` binary.
//!
//! Sources, lowest precedence first: the TOML file named by `--config`
//! (optional), `CONTACTS_*` environment variables, then CLI flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Shape of the config file and environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// SQLite database file. A leading `~/` is expanded.
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
}

impl Default for CliConfig {
  fn default() -> Self { Self { database_path: default_database_path() } }
}

fn default_database_path() -> PathBuf { PathBuf::from("contacts.db") }

const ENV_PREFIX: &str = "CONTACTS";

/// Read `path` (if it exists) and the process environment into a [`CliConfig`].
pub fn load(path: &Path) -> anyhow::Result<CliConfig> {
  load_from(path, config::Environment::with_prefix(ENV_PREFIX))
}

/// Like [`load`], with the environment source supplied by the caller.
pub fn load_from(path: &Path, env: config::Environment) -> anyhow::Result<CliConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(env)
    .build()
    .with_context(|| format!("failed to read config file {}", path.display()))?;

  settings
    .try_deserialize()
    .context("failed to deserialise CliConfig")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<config::Map<String, String>>();
    config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
  }

  fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("contacts.toml");
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn missing_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let cfg = load_from(&dir.path().join("contacts.toml"), env(&[])).unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("contacts.db"));
  }

  #[test]
  fn reads_database_path_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "database_path = \"/tmp/clients.db\"\n");

    let cfg = load_from(&path, env(&[])).unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("/tmp/clients.db"));
  }

  #[test]
  fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "database_path = \"/tmp/clients.db\"\n");

    let cfg = load_from(&path, env(&[("CONTACTS_DATABASE_PATH", "/srv/contacts.db")])).unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("/srv/contacts.db"));
  }

  #[test]
  fn unrelated_variables_are_ignored() {
    let dir = TempDir::new().unwrap();
    let cfg = load_from(
      &dir.path().join("contacts.toml"),
      env(&[("OTHER_DATABASE_PATH", "/nope.db")]),
    )
    .unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("contacts.db"));
  }

  #[test]
  fn tilde_expands_only_at_start() {
    assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/contacts.db")),
        PathBuf::from(home).join("contacts.db")
      );
    }
  }
}
