//! Per-repository enrichment.
//!
//! Fetches the language statistics and README of one repository, parses the
//! README header and resolves the preview image. Nothing here fails the run:
//! each problem is logged, recorded as a warning and replaced by an empty
//! value.

use crate::config::PortfolioSettings;
use crate::github::{GitHubApi, LanguageBreakdown, RepositorySummary};
use crate::preview::resolve_preview;
use crate::readme::{decode_payload, parse_header, ReadmeHeader};
use tracing::{debug, info_span, warn, Instrument};

/// What happened to a repository's README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeStatus {
    /// Decoded; `header` holds whatever was parsed.
    Found,

    /// The repository has no README.
    Missing,

    /// The README could not be fetched or decoded.
    Unavailable,
}

/// Everything fetched for one repository.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub languages: LanguageBreakdown,
    pub readme: ReadmeStatus,
    pub header: Option<ReadmeHeader>,
    pub preview: Option<String>,
    /// Recoverable problems met while enriching.
    pub warnings: Vec<String>,
}

/// Enriches one repository.
///
/// Languages and README are fetched concurrently; the preview probe runs
/// after them.
pub async fn enrich_repository(
    api: &dyn GitHubApi,
    repository: &RepositorySummary,
    settings: &PortfolioSettings,
) -> Enrichment {
    let owner = repository.owner_login(&settings.owner);
    let span = info_span!("enrich", repo = %repository.name);

    async {
        let mut warnings = Vec::new();

        let (languages, readme) = futures::join!(
            api.languages(owner, &repository.name),
            api.readme(owner, &repository.name)
        );

        let languages = languages.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch languages, using none");
            warnings.push(format!("languages unavailable: {e}"));
            LanguageBreakdown::default()
        });

        let (readme, header) = match readme {
            Ok(payload) => match decode_payload(&payload) {
                Some(Ok(text)) => (
                    ReadmeStatus::Found,
                    parse_header(&text, settings.readme_window),
                ),
                Some(Err(e)) => {
                    warn!(error = %e, "Failed to decode README");
                    warnings.push(format!("README undecodable: {e}"));
                    (ReadmeStatus::Unavailable, None)
                }
                None => (ReadmeStatus::Missing, None),
            },
            Err(e) if e.is_not_found() => {
                debug!("Repository has no README");
                (ReadmeStatus::Missing, None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch README");
                warnings.push(format!("README unavailable: {e}"));
                (ReadmeStatus::Unavailable, None)
            }
        };

        if readme == ReadmeStatus::Found && header.is_none() {
            debug!("README has no recognised header");
        }

        let preview = resolve_preview(
            api,
            owner,
            &repository.name,
            repository.branch(),
            &settings.preview_path,
        )
        .await;

        Enrichment {
            languages,
            readme,
            header,
            preview,
            warnings,
        }
    }
    .instrument(span)
    .await
}
