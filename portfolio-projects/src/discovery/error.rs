//! Repository discovery error types.

use crate::github::TransportError;
use thiserror::Error;

/// Errors that can occur during repository discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The repository listing could not be fetched.
    #[error("Failed to list repositories for '{owner}': {source}")]
    Listing {
        owner: String,
        #[source]
        source: TransportError,
    },
}
