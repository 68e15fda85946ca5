//! Preview image resolution.

use crate::github::{GitHubApi, RAW_CONTENT_BASE};
use tracing::debug;
use url::Url;

/// Builds the raw-content URL of the preview asset.
///
/// Format: `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}`
pub fn preview_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
    let mut url = match Url::parse(RAW_CONTENT_BASE) {
        Ok(url) => url,
        Err(_) => return format!("{RAW_CONTENT_BASE}/{owner}/{repo}/{branch}/{path}"),
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .clear()
            .push(owner)
            .push(repo)
            .extend(branch.split('/'))
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }

    url.to_string()
}

/// Probes the preview asset, returning its URL when it exists.
///
/// Any probe failure means the site shows its placeholder image instead.
pub async fn resolve_preview(
    api: &dyn GitHubApi,
    owner: &str,
    repo: &str,
    branch: &str,
    path: &str,
) -> Option<String> {
    let url = preview_url(owner, repo, branch, path);

    match api.probe(&url).await {
        Ok(()) => Some(url),
        Err(e) => {
            debug!(repo, error = %e, "No preview asset");
            None
        }
    }
}
