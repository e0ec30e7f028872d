//! Config loading from environment variables

use std::path::PathBuf;

use bunkai::BunkaiConfig;

use super::constants::{DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_CONFIG_PATH, ENV_DATASET_PATH};
use crate::errors::{ApiError, Result};

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:5540")
  pub bind_addr: String,
  /// JSON Lines dataset to load at startup
  pub dataset_path: PathBuf,
  /// Optional bunkai TOML configuration
  pub config_path: Option<PathBuf>,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if `BUNKAI_DATASET_PATH` is missing or empty
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary variable lookup.
  ///
  /// Empty values count as unset.
  ///
  /// # Errors
  /// Returns an error if the dataset path is missing
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let bind_addr = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let dataset_path = get(ENV_DATASET_PATH)
      .map(PathBuf::from)
      .ok_or_else(|| ApiError::config(format!("{ENV_DATASET_PATH} が設定されていません")))?;
    let config_path = get(ENV_CONFIG_PATH).map(PathBuf::from);

    Ok(Self {
      bind_addr,
      dataset_path,
      config_path,
    })
  }

  /// Reads the bunkai configuration, falling back to defaults when no path is set.
  ///
  /// # Errors
  /// Returns an error if the TOML file cannot be read or is invalid
  pub fn load_bunkai_config(&self) -> Result<BunkaiConfig> {
    match &self.config_path {
      Some(path) => Ok(BunkaiConfig::from_file(path)?),
      None => Ok(BunkaiConfig::default()),
    }
  }
}
