//! Orchestrates an aggregation run.
//!
//! A run has two stages separated by a join: discovery lists and selects
//! the candidates, then every candidate is enriched concurrently. Assembly
//! starts only once all enrichments have finished.

mod error;

pub use error::RunnerError;

use crate::config::PortfolioSettings;
use crate::discovery::discover_candidates;
use crate::enrichment::{enrich_repository, Enrichment};
use crate::github::{GitHubApi, OctocrabApi, RepositorySummary};
use crate::projects::{assemble_project, AggregationResult, ProjectRecord};
use crate::summary::{ProcessingResult, RunSummary};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Origin named in validation errors for settings built in code.
const SETTINGS_ORIGIN: &str = "runner settings";

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The document to publish.
    pub result: AggregationResult,

    /// Per-run counts.
    pub summary: RunSummary,

    /// Outcome of every candidate, in listing order.
    pub outcomes: Vec<ProcessingResult>,
}

/// Runs the aggregation pipeline against a [`GitHubApi`].
#[derive(Clone)]
pub struct Runner {
    settings: PortfolioSettings,
    api: Arc<dyn GitHubApi>,
}

impl Runner {
    /// Builds a runner talking to GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] when the credential is missing or a
    /// setting is out of range, or [`RunnerError::Client`] if the HTTP
    /// clients cannot be built.
    pub fn new(settings: PortfolioSettings) -> Result<Self, RunnerError> {
        settings.require_token()?;
        settings.validate(SETTINGS_ORIGIN)?;
        let api = OctocrabApi::new(&settings)?;
        Ok(Self::with_api(settings, Arc::new(api)))
    }

    /// Builds a runner over any transport.
    pub fn with_api(settings: PortfolioSettings, api: Arc<dyn GitHubApi>) -> Self {
        Self { settings, api }
    }

    /// Executes a full run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] before any request when the credential
    /// is missing or a setting is out of range, and
    /// [`RunnerError::Discovery`] when the listing fails.
    /// Problems with individual repositories never fail the run.
    pub async fn run(&self) -> Result<RunReport, RunnerError> {
        self.settings.require_token()?;
        // `buffered(0)` never polls its input
        self.settings.validate(SETTINGS_ORIGIN)?;

        let span = info_span!("run", owner = %self.settings.owner);
        async {
            let discovery = discover_candidates(self.api.as_ref(), &self.settings).await?;
            let mut summary = RunSummary::new(discovery.listed, discovery.candidates.len());

            if discovery.candidates.is_empty() {
                warn!("No portfolio repositories found");
            }

            let enriched = self.enrich_all(discovery.candidates).await;

            let mut projects = Vec::with_capacity(enriched.len());
            let mut outcomes = Vec::with_capacity(enriched.len());
            for (repository, enrichment) in enriched {
                let (project, outcome) = self.assemble(&repository, enrichment);
                summary.record_result(&outcome);
                outcomes.push(outcome);
                projects.extend(project);
            }

            info!(
                listed = summary.repositories_listed,
                included = summary.projects_included,
                degraded = summary.projects_degraded,
                skipped = summary.projects_skipped,
                "Run complete"
            );

            Ok(RunReport {
                result: AggregationResult::new(self.settings.owner.clone(), projects),
                summary,
                outcomes,
            })
        }
        .instrument(span)
        .await
    }

    /// Enriches every candidate and waits for all of them.
    async fn enrich_all(
        &self,
        candidates: Vec<RepositorySummary>,
    ) -> Vec<(RepositorySummary, Enrichment)> {
        let api = self.api.as_ref();
        let settings = &self.settings;

        stream::iter(candidates)
            .map(|repository| async move {
                let enrichment = enrich_repository(api, &repository, settings).await;
                (repository, enrichment)
            })
            .buffered(settings.concurrency)
            .collect()
            .await
    }

    /// Applies the header policy and builds the record.
    fn assemble(
        &self,
        repository: &RepositorySummary,
        enrichment: Enrichment,
    ) -> (Option<ProjectRecord>, ProcessingResult) {
        if let Some(reason) = self.settings.header_policy().skip_reason(&enrichment) {
            warn!(repo = %repository.name, reason = %reason, "Skipping repository");
            return (
                None,
                ProcessingResult::Skipped {
                    repository: repository.name.clone(),
                    reason,
                },
            );
        }

        let project = assemble_project(
            repository,
            enrichment.languages,
            enrichment.header.as_ref(),
            enrichment.preview,
            &self.settings.owner,
        );

        (
            Some(project),
            ProcessingResult::Included {
                repository: repository.name.clone(),
                warnings: enrichment.warnings,
            },
        )
    }
}
