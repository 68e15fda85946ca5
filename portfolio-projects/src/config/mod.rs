//! Configuration loading.
//!
//! Settings come from an optional `portfolio.toml` file, with the GitHub
//! credential always taken from the environment (or the CLI) rather than
//! from disk.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{PortfolioSettings, DEFAULT_OWNER, TOKEN_ENV_VAR};

use std::path::Path;
use tracing::info;

/// Loads settings from `path` when given, otherwise uses the defaults.
///
/// The credential is read from [`TOKEN_ENV_VAR`] in both cases.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
pub fn load_settings(path: Option<&Path>) -> Result<PortfolioSettings, ConfigError> {
    let settings = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading settings");
            PortfolioSettings::load(path)?
        }
        None => PortfolioSettings::default(),
    };

    Ok(settings.with_env_token())
}
