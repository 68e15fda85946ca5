//! GitHub transport.
//!
//! The pipeline only talks to GitHub through [`GitHubApi`], so a run can be
//! driven by [`OctocrabApi`] in production and by an in-memory fake in tests.

mod client;
mod error;
mod models;

pub use client::{ClientError, OctocrabApi, API_BASE, RAW_CONTENT_BASE};
pub use error::TransportError;
pub use models::{
    EncodedReadme, LanguageBreakdown, RepositoryOwner, RepositorySummary, FALLBACK_BRANCH,
};

use async_trait::async_trait;

/// Outbound calls made by one aggregation run.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Lists the repositories owned by `owner` (a single page of `per_page`).
    async fn list_repositories(
        &self,
        owner: &str,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary>, TransportError>;

    /// Fetches the language statistics of `owner/repo`.
    async fn languages(&self, owner: &str, repo: &str)
        -> Result<LanguageBreakdown, TransportError>;

    /// Fetches the README resource of `owner/repo`.
    ///
    /// A repository without README answers with a 404 [`TransportError::Status`].
    async fn readme(&self, owner: &str, repo: &str) -> Result<EncodedReadme, TransportError>;

    /// Checks that `url` exists with a HEAD request.
    async fn probe(&self, url: &str) -> Result<(), TransportError>;
}
