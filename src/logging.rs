//! Structured logging setup for the binary. The library only emits
//! `tracing` events; nothing here runs unless a front end asks for it.

use crate::config::Config;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("cannot open log file: {0}")]
    File(#[from] io::Error),
    #[error("a global subscriber is already installed")]
    AlreadySet,
}

/// Installs a file-backed `fmt` subscriber when `KLONDIKE_LOG` is set.
///
/// Returns `Ok(false)` when logging is disabled. Log lines never go to the
/// terminal, which belongs to the TUI.
pub fn init(config: &Config) -> Result<bool, LoggingError> {
    let Some(directives) = config.log_filter() else {
        return Ok(false);
    };
    let filter =
        EnvFilter::try_new(directives).map_err(|err| LoggingError::Filter(err.to_string()))?;
    let file = File::create(config.log_file())?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|_| LoggingError::AlreadySet)?;
    tracing::info!(file = %config.log_file().display(), "logging started");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_filter() {
        assert!(!init(&Config::default()).unwrap());
    }

    #[test]
    fn bad_filter_is_reported() {
        let cfg = Config::from_lookup(|key| {
            (key == crate::config::LOG_VAR).then(|| "klondike_rs=notalevel".to_string())
        })
        .unwrap();
        assert!(matches!(init(&cfg), Err(LoggingError::Filter(_))));
    }
}
