//! Pipeline settings.

use crate::config::ConfigError;
use crate::discovery::Selection;
use crate::projects::HeaderPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// GitHub account whose repositories make up the portfolio.
pub const DEFAULT_OWNER: &str = "arianadeabreudesigndev";

/// Environment variable holding the GitHub credential.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Settings shared by the offline generator and the HTTP endpoint.
///
/// Every key is optional in `portfolio.toml`; missing keys take the
/// values from [`Default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PortfolioSettings {
    /// Account whose repositories are listed.
    pub owner: String,

    /// Topic that marks a repository as part of the portfolio.
    pub marker_topic: String,

    /// Skip the topic filter and consider every repository.
    pub all_repositories: bool,

    /// Drop repositories whose README header is incomplete.
    pub require_header: bool,

    /// Number of leading README lines scanned for the header.
    pub readme_window: usize,

    /// Preview asset path relative to the repository root.
    pub preview_path: String,

    /// Page size for the repository listing.
    pub per_page: u8,

    /// Maximum concurrent repository enrichments.
    pub concurrency: usize,

    /// Deadline for every outbound request, in seconds.
    pub request_timeout_secs: u64,

    /// Value sent in the `X-GitHub-Api-Version` header.
    pub api_version: String,

    /// Where the offline generator writes its JSON document.
    pub output: PathBuf,

    /// GitHub bearer token. Never read from the settings file.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            marker_topic: "portfolio".to_string(),
            all_repositories: false,
            require_header: false,
            readme_window: 12,
            preview_path: "assets/preview.svg".to_string(),
            per_page: 100,
            concurrency: 5,
            request_timeout_secs: 10,
            api_version: "2022-11-28".to_string(),
            output: PathBuf::from("projects.json"),
            token: None,
        }
    }
}

impl PortfolioSettings {
    /// Reads and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(&path.display().to_string())?;
        Ok(settings)
    }

    /// Checks value ranges. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid value.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: origin.to_string(),
                message: message.to_string(),
            })
        };

        if self.owner.trim().is_empty() {
            return fail("owner must not be empty");
        }
        if self.marker_topic.trim().is_empty() {
            return fail("marker-topic must not be empty");
        }
        if self.preview_path.trim().is_empty() {
            return fail("preview-path must not be empty");
        }
        if self.readme_window == 0 {
            return fail("readme-window must be at least 1");
        }
        if !(1..=100).contains(&self.per_page) {
            return fail("per-page must be between 1 and 100");
        }
        if self.concurrency == 0 {
            return fail("concurrency must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            return fail("request-timeout-secs must be at least 1");
        }

        Ok(())
    }

    /// Sets the credential. Blank tokens count as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Fills the credential from [`TOKEN_ENV_VAR`].
    pub fn with_env_token(self) -> Self {
        let token = std::env::var(TOKEN_ENV_VAR).ok();
        self.with_token(token)
    }

    /// Returns the credential, failing before any request is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] when no token is set.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingCredential)
    }

    /// Repository selection derived from the settings.
    pub fn selection(&self) -> Selection {
        if self.all_repositories {
            Selection::All
        } else {
            Selection::Tagged(self.marker_topic.clone())
        }
    }

    /// Inclusion policy for repositories with incomplete README headers.
    pub fn header_policy(&self) -> HeaderPolicy {
        if self.require_header {
            HeaderPolicy::Required
        } else {
            HeaderPolicy::Lenient
        }
    }

    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
