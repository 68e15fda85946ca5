//! GitHub REST payloads consumed by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Branch assumed when the API does not report one.
pub const FALLBACK_BRANCH: &str = "main";

/// Repository owner as returned inside a repository payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// One entry of `GET /users/{owner}/repos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositorySummary {
    pub name: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub owner: Option<RepositoryOwner>,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub homepage: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub default_branch: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub visibility: Option<String>,
}

impl RepositorySummary {
    /// Default branch, or [`FALLBACK_BRANCH`].
    pub fn branch(&self) -> &str {
        self.default_branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(FALLBACK_BRANCH)
    }

    /// Owner login, or `fallback` when the payload has none.
    pub fn owner_login<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.owner.as_ref().map_or(fallback, |o| o.login.as_str())
    }

    /// `owner/name`, built from the owner when the API omits it.
    pub fn full_name(&self, fallback_owner: &str) -> String {
        match &self.full_name {
            Some(full_name) => full_name.clone(),
            None => format!("{}/{}", self.owner_login(fallback_owner), self.name),
        }
    }

    /// Returns true if any topic equals `topic`, ignoring case.
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t.eq_ignore_ascii_case(topic))
    }
}

/// Bytes of code per language for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageBreakdown(pub BTreeMap<String, u64>);

impl LanguageBreakdown {
    /// Language names, largest first. Ties are ordered by name.
    pub fn names(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &u64)> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `GET /repos/{owner}/{repo}/readme` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodedReadme {
    /// Base64 content, possibly wrapped across lines.
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub encoding: Option<String>,
}
