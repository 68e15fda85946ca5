//! Repository discovery.
//!
//! Lists every repository of the configured account, then keeps the ones
//! that belong in the portfolio.

mod error;

pub use error::DiscoveryError;

use crate::config::PortfolioSettings;
use crate::github::{GitHubApi, RepositorySummary};
use tracing::{debug, info, info_span, Instrument};

/// Which listed repositories become pipeline candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Keep repositories carrying this topic (case-insensitive).
    Tagged(String),

    /// Keep every repository.
    All,
}

impl Selection {
    /// Returns true if `repository` passes this selection.
    pub fn matches(&self, repository: &RepositorySummary) -> bool {
        match self {
            Self::Tagged(topic) => repository.has_topic(topic),
            Self::All => true,
        }
    }
}

/// Result of the listing stage.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Number of repositories returned by the listing.
    pub listed: usize,

    /// Repositories kept by the selection, in listing order.
    pub candidates: Vec<RepositorySummary>,
}

/// Lists the account's repositories and applies the configured selection.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the listing request fails. This is the
/// only failure that aborts a run.
pub async fn discover_candidates(
    api: &dyn GitHubApi,
    settings: &PortfolioSettings,
) -> Result<Discovery, DiscoveryError> {
    let span = info_span!("discover", owner = %settings.owner);

    async {
        info!("Listing repositories");

        let repositories = api
            .list_repositories(&settings.owner, settings.per_page)
            .await
            .map_err(|source| DiscoveryError::Listing {
                owner: settings.owner.clone(),
                source,
            })?;

        let listed = repositories.len();
        let candidates = select_repositories(repositories, &settings.selection());

        info!(listed, candidates = candidates.len(), "Discovery complete");
        Ok(Discovery { listed, candidates })
    }
    .instrument(span)
    .await
}

/// Keeps the repositories that match `selection`, preserving order.
pub fn select_repositories(
    repositories: Vec<RepositorySummary>,
    selection: &Selection,
) -> Vec<RepositorySummary> {
    repositories
        .into_iter()
        .filter(|repo| {
            let keep = selection.matches(repo);
            if !keep {
                debug!(repo = %repo.name, "Not a portfolio repository");
            }
            keep
        })
        .collect()
}
