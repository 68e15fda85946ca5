//! Output records.

use crate::github::LanguageBreakdown;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One portfolio project as consumed by the site.
///
/// Field names follow what the front-end reads, hence the mixed casing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub homepage: Option<String>,
    pub github_description: Option<String>,
    #[serde(rename = "readmeTitle")]
    pub readme_title: String,
    pub short_description: String,
    pub description: String,
    pub topics: Vec<String>,
    pub languages: LanguageBreakdown,
    #[serde(rename = "languageList")]
    pub language_list: Vec<String>,
    pub default_branch: String,
    pub preview: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub archived: bool,
    pub disabled: bool,
    pub visibility: Option<String>,
}

/// The document returned by the endpoint and written by the generator.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    owner: String,
    count: usize,
    #[serde(rename = "fetchedAt")]
    fetched_at: DateTime<Utc>,
    projects: Vec<ProjectRecord>,
}

impl AggregationResult {
    /// Wraps `projects`, stamping the current time.
    #[must_use]
    pub fn new(owner: impl Into<String>, projects: Vec<ProjectRecord>) -> Self {
        Self::at(owner, projects, Utc::now())
    }

    /// Wraps `projects` with an explicit generation time.
    #[must_use]
    pub fn at(
        owner: impl Into<String>,
        projects: Vec<ProjectRecord>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner: owner.into(),
            count: projects.len(),
            fetched_at,
            projects,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }
}
