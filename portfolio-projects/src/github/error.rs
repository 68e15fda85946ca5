//! Transport error types.

use thiserror::Error;

/// Errors raised by outbound HTTP calls.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("GitHub error {status} at {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The call did not finish before its deadline.
    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The request could not be sent, or its response could not be read or
    /// parsed. No status is available.
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a `404 Not Found` answer.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Converts an octocrab error raised before a response was read.
    ///
    /// Answers from GitHub never reach here: the client reads the raw
    /// response and reports its status itself. What remains (connection,
    /// TLS or body read failures) has no status to report.
    pub(crate) fn from_octocrab(url: &str, error: octocrab::Error) -> Self {
        Self::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
