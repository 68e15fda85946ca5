//! Runner error types.

/// Errors that abort an aggregation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors, including a missing credential.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The repository listing failed.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// HTTP client initialization errors.
    #[error(transparent)]
    Client(#[from] crate::github::ClientError),
}
