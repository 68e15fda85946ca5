//! Production transport backed by octocrab and reqwest.

use crate::config::PortfolioSettings;
use crate::github::{
    EncodedReadme, GitHubApi, LanguageBreakdown, RepositorySummary, TransportError,
};
use async_trait::async_trait;
use http::header::{HeaderName, ACCEPT};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// GitHub REST API root.
pub const API_BASE: &str = "https://api.github.com";

/// Host serving raw repository files.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

const USER_AGENT: &str = "portfolio-projects";

/// Errors raised while building the HTTP clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Raw-content client initialization errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// [`GitHubApi`] over the real network.
#[derive(Clone)]
pub struct OctocrabApi {
    client: Octocrab,
    http: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl OctocrabApi {
    /// Builds the clients against [`API_BASE`]. Without a token, API calls
    /// are made anonymously.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either client cannot be built.
    pub fn new(settings: &PortfolioSettings) -> Result<Self, ClientError> {
        Self::with_base_uri(settings, API_BASE)
    }

    /// Builds the clients against another API root, such as a GitHub
    /// Enterprise host.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if `base` is not a valid URI or either client
    /// cannot be built.
    pub fn with_base_uri(settings: &PortfolioSettings, base: &str) -> Result<Self, ClientError> {
        install_crypto_provider();

        let base = base.trim_end_matches('/').to_string();
        let mut builder = Octocrab::builder()
            .base_uri(base.as_str())?
            .add_header(ACCEPT, "application/vnd.github+json".to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                settings.api_version.clone(),
            );
        if let Some(token) = &settings.token {
            builder = builder.personal_token(token.clone());
        }
        let client = builder.build()?;

        let timeout = settings.request_timeout();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            http,
            base,
            timeout,
        })
    }

    /// Runs a call under the per-request deadline.
    async fn within<T, F>(&self, url: &str, call: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }

    /// GETs `route` and deserializes the JSON answer.
    ///
    /// The raw response is read instead of octocrab's typed `get`, so error
    /// answers keep their status even when the body is not GitHub's JSON
    /// error shape (an HTML 502 page from a proxy, for instance).
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, TransportError> {
        let url = format!("{}{route}", self.base);
        debug!(url = %url, "GitHub request");

        self.within(&url, async {
            let response = self
                .client
                ._get(route)
                .await
                .map_err(|e| TransportError::from_octocrab(&url, e))?;
            let status = response.status();
            let body = self
                .client
                .body_to_string(response)
                .await
                .map_err(|e| TransportError::from_octocrab(&url, e))?;

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                    body: body.trim().to_string(),
                });
            }

            serde_json::from_str(&body).map_err(|e| TransportError::Request {
                url: url.clone(),
                message: format!("Invalid response body: {e}"),
            })
        })
        .await
    }
}

/// Makes aws-lc-rs the process-wide rustls provider unless one is already
/// installed. octocrab and reqwest both resolve their TLS config from it.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

#[async_trait]
impl GitHubApi for OctocrabApi {
    async fn list_repositories(
        &self,
        owner: &str,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary>, TransportError> {
        self.get_json(&format!("/users/{owner}/repos?per_page={per_page}"))
            .await
    }

    async fn languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageBreakdown, TransportError> {
        self.get_json(&format!("/repos/{owner}/{repo}/languages"))
            .await
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<EncodedReadme, TransportError> {
        self.get_json(&format!("/repos/{owner}/{repo}/readme"))
            .await
    }

    async fn probe(&self, url: &str) -> Result<(), TransportError> {
        debug!(url, "Probing asset");
        let response = self.http.head(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                }
            } else {
                TransportError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    fn settings(timeout_secs: u64) -> PortfolioSettings {
        PortfolioSettings {
            owner: "octo".to_string(),
            request_timeout_secs: timeout_secs,
            ..Default::default()
        }
        .with_token(Some("test-token".to_string()))
    }

    /// Serves `router` on an ephemeral local port and returns its root URL.
    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn github_router() -> Router {
        Router::new()
            .route(
                "/users/octo/repos",
                get(|| async {
                    (
                        StatusCode::BAD_GATEWAY,
                        Html("<html><body><h1>502 Bad Gateway</h1></body></html>"),
                    )
                }),
            )
            .route(
                "/repos/octo/site/languages",
                get(|| async { Json(serde_json::json!({ "Rust": 900, "HTML": 100 })) }),
            )
            .route(
                "/repos/octo/site/readme",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(serde_json::json!({ "message": "Not Found" })),
                    )
                }),
            )
    }

    #[tokio::test]
    async fn can_build_client() {
        let api = OctocrabApi::new(&settings(10)).unwrap();

        assert_eq!(api.base, API_BASE);
        assert_eq!(api.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn expired_deadline_is_timeout() {
        let api = OctocrabApi::new(&settings(1)).unwrap();

        let result: Result<(), TransportError> = api
            .within("https://api.github.com/slow", futures::future::pending())
            .await;

        match result {
            Err(TransportError::Timeout { url, secs }) => {
                assert_eq!(url, "https://api.github.com/slow");
                assert_eq!(secs, 1);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn can_fetch_json_resource() {
        let base = spawn_server(github_router()).await;
        let api = OctocrabApi::with_base_uri(&settings(10), &base).unwrap();

        let languages = api.languages("octo", "site").await.unwrap();

        assert_eq!(languages.names(), vec!["Rust", "HTML"]);
    }

    #[tokio::test]
    async fn json_error_keeps_status_and_body() {
        let base = spawn_server(github_router()).await;
        let api = OctocrabApi::with_base_uri(&settings(10), &base).unwrap();

        let error = api.readme("octo", "site").await.unwrap_err();

        assert!(error.is_not_found());
        assert!(error.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn html_error_page_keeps_status_and_body() {
        let base = spawn_server(github_router()).await;
        let api = OctocrabApi::with_base_uri(&settings(10), &base).unwrap();

        match api.list_repositories("octo", 100).await {
            Err(TransportError::Status { status, url, body }) => {
                assert_eq!(status, 502);
                assert_eq!(url, format!("{base}/users/octo/repos?per_page=100"));
                assert!(body.contains("502 Bad Gateway"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
