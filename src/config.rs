//! Runtime configuration read from the environment.
//!
//! - `KLONDIKE_SEED`: deal this seed instead of a random one
//! - `KLONDIKE_LOG`: tracing filter (e.g. `klondike_rs=debug`); logging is off when unset
//! - `KLONDIKE_LOG_FILE`: where log lines go, default `klondike.log`

use std::path::{Path, PathBuf};

pub const SEED_VAR: &str = "KLONDIKE_SEED";
pub const LOG_VAR: &str = "KLONDIKE_LOG";
pub const LOG_FILE_VAR: &str = "KLONDIKE_LOG_FILE";
pub const DEFAULT_LOG_FILE: &str = "klondike.log";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got '{value}'")]
    InvalidSeed { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    seed: Option<u64>,
    log_filter: Option<String>,
    log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed: None, log_filter: None, log_file: PathBuf::from(DEFAULT_LOG_FILE) }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let seed = match get(SEED_VAR) {
            Some(v) => Some(v.trim().parse().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value: v.clone(),
            })?),
            None => None,
        };
        let log_file = get(LOG_FILE_VAR).map(PathBuf::from).unwrap_or_else(|| DEFAULT_LOG_FILE.into());
        Ok(Self { seed, log_filter: get(LOG_VAR), log_file })
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.log_filter.as_deref()
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}
