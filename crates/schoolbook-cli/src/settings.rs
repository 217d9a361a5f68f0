//! Runtime settings, read from an optional TOML file layered with
//! `SCHOOLBOOK_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use schoolbook_core::identity::{Identity, Role, StaticDirectory};
use serde::Deserialize;

/// Where the database lives unless configured otherwise.
const DEFAULT_STORE_PATH: &str = "~/.local/share/schoolbook/schoolbook.db";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Replaces the reference directory when non-empty.
  #[serde(default)]
  pub identities: Vec<IdentityConfig>,
}

/// One `[[identities]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
  pub id:           String,
  pub username:     String,
  pub password:     String,
  pub role:         RoleConfig,
  pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleConfig {
  Teacher,
  Student,
}

impl From<RoleConfig> for Role {
  fn from(role: RoleConfig) -> Self {
    match role {
      RoleConfig::Teacher => Role::Teacher,
      RoleConfig::Student => Role::Student,
    }
  }
}

fn default_store_path() -> PathBuf { PathBuf::from(DEFAULT_STORE_PATH) }

impl AppConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SCHOOLBOOK"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  /// The identity directory this deployment signs people in against.
  pub fn directory(&self) -> StaticDirectory {
    if self.identities.is_empty() {
      return StaticDirectory::reference();
    }
    StaticDirectory::new(
      self
        .identities
        .iter()
        .cloned()
        .map(|i| Identity {
          display_name: i.display_name.unwrap_or_else(|| i.username.clone()),
          id:           i.id,
          username:     i.username,
          password:     i.password,
          role:         i.role.into(),
        })
        .collect(),
    )
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
