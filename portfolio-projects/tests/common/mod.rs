//! In-memory GitHub used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use portfolio_projects::{
    EncodedReadme, GitHubApi, LanguageBreakdown, PortfolioSettings, RepositorySummary,
    TransportError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const OWNER: &str = "octo";

/// Canned answers keyed by repository name. Anything not configured answers
/// like GitHub would for a missing resource.
#[derive(Default)]
pub struct FakeGitHub {
    repositories: Vec<RepositorySummary>,
    listing_status: Option<u16>,
    languages: HashMap<String, Result<String, u16>>,
    readmes: HashMap<String, Result<String, u16>>,
    previews: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, repository: RepositorySummary) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn failing_listing(mut self, status: u16) -> Self {
        self.listing_status = Some(status);
        self
    }

    pub fn with_languages(mut self, repo: &str, json: &str) -> Self {
        self.languages.insert(repo.to_string(), Ok(json.to_string()));
        self
    }

    pub fn failing_languages(mut self, repo: &str, status: u16) -> Self {
        self.languages.insert(repo.to_string(), Err(status));
        self
    }

    /// Serves `text` as the README, base64-encoded like the API does.
    pub fn with_readme(self, repo: &str, text: &str) -> Self {
        let encoded = STANDARD.encode(text);
        self.with_encoded_readme(repo, &encoded)
    }

    pub fn with_encoded_readme(mut self, repo: &str, content: &str) -> Self {
        self.readmes.insert(repo.to_string(), Ok(content.to_string()));
        self
    }

    pub fn failing_readme(mut self, repo: &str, status: u16) -> Self {
        self.readmes.insert(repo.to_string(), Err(status));
        self
    }

    pub fn with_preview(mut self, url: &str) -> Self {
        self.previews.insert(url.to_string());
        self
    }

    /// Number of calls made through [`GitHubApi`].
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn status_error(status: u16, url: String) -> TransportError {
    TransportError::Status {
        status,
        url,
        body: "fake response".to_string(),
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_repositories(
        &self,
        owner: &str,
        _per_page: u8,
    ) -> Result<Vec<RepositorySummary>, TransportError> {
        self.record_call();
        match self.listing_status {
            Some(status) => Err(status_error(status, format!("/users/{owner}/repos"))),
            None => Ok(self.repositories.clone()),
        }
    }

    async fn languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageBreakdown, TransportError> {
        self.record_call();
        let url = format!("/repos/{owner}/{repo}/languages");
        match self.languages.get(repo) {
            Some(Ok(json)) => Ok(serde_json::from_str(json).unwrap()),
            Some(Err(status)) => Err(status_error(*status, url)),
            None => Ok(LanguageBreakdown::default()),
        }
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<EncodedReadme, TransportError> {
        self.record_call();
        let url = format!("/repos/{owner}/{repo}/readme");
        match self.readmes.get(repo) {
            Some(Ok(content)) => Ok(EncodedReadme {
                content: Some(content.clone()),
                encoding: Some("base64".to_string()),
            }),
            Some(Err(status)) => Err(status_error(*status, url)),
            None => Err(status_error(404, url)),
        }
    }

    async fn probe(&self, url: &str) -> Result<(), TransportError> {
        self.record_call();
        if self.previews.contains(url) {
            Ok(())
        } else {
            Err(status_error(404, url.to_string()))
        }
    }
}

pub fn repository(name: &str, topics: &[&str], description: Option<&str>) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        html_url: format!("https://github.com/{OWNER}/{name}"),
        description: description.map(str::to_string),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        default_branch: Some("main".to_string()),
        ..Default::default()
    }
}

pub fn settings() -> PortfolioSettings {
    PortfolioSettings {
        owner: OWNER.to_string(),
        ..Default::default()
    }
    .with_token(Some("test-token".to_string()))
}

pub fn preview_for(name: &str) -> String {
    format!("https://raw.githubusercontent.com/{OWNER}/{name}/main/assets/preview.svg")
}
