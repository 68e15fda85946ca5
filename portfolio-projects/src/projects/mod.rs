//! Project assembly.
//!
//! Merges a repository with its enrichment into a [`ProjectRecord`]. This is
//! pure data shaping; all I/O happened earlier in the run.

mod record;

pub use record::{AggregationResult, ProjectRecord};

use crate::enrichment::{Enrichment, ReadmeStatus};
use crate::github::{LanguageBreakdown, RepositorySummary};
use crate::readme::ReadmeHeader;

/// What to do with repositories whose README header is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Include them with fallback values.
    #[default]
    Lenient,

    /// Skip them.
    Required,
}

impl HeaderPolicy {
    /// Returns the reason to skip this repository, if any.
    pub fn skip_reason(&self, enrichment: &Enrichment) -> Option<String> {
        match self {
            Self::Lenient => None,
            Self::Required => match (&enrichment.readme, &enrichment.header) {
                (ReadmeStatus::Missing, _) => Some("README not found".to_string()),
                (ReadmeStatus::Unavailable, _) => Some("README unavailable".to_string()),
                (ReadmeStatus::Found, None) => Some("README header not found".to_string()),
                (ReadmeStatus::Found, Some(header)) if !header.is_complete() => Some(format!(
                    "README header missing {}",
                    header.missing_fields().join(", ")
                )),
                (ReadmeStatus::Found, Some(_)) => None,
            },
        }
    }
}

/// Builds the record for one repository.
///
/// Text fields fall back from the README header to the repository
/// description, then to an empty string; the title falls back to the
/// repository name.
pub fn assemble_project(
    repository: &RepositorySummary,
    languages: LanguageBreakdown,
    header: Option<&ReadmeHeader>,
    preview: Option<String>,
    fallback_owner: &str,
) -> ProjectRecord {
    let github_description = non_empty(repository.description.as_deref());
    let header = header.cloned().unwrap_or_default();

    let description = header
        .description
        .or_else(|| github_description.clone())
        .unwrap_or_default();
    let short_description = header
        .short_description
        .or_else(|| github_description.clone())
        .unwrap_or_default();
    let readme_title = header.title.unwrap_or_else(|| repository.name.clone());

    ProjectRecord {
        name: repository.name.clone(),
        full_name: repository.full_name(fallback_owner),
        html_url: repository.html_url.clone(),
        homepage: non_empty(repository.homepage.as_deref()),
        github_description,
        readme_title,
        short_description,
        description,
        topics: repository.topics.clone(),
        language_list: languages.names(),
        languages,
        default_branch: repository.branch().to_string(),
        preview,
        created_at: repository.created_at,
        updated_at: repository.updated_at,
        pushed_at: repository.pushed_at,
        archived: repository.archived,
        disabled: repository.disabled,
        visibility: repository.visibility.clone(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
