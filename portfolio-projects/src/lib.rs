#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod discovery;
pub mod endpoint;
pub mod enrichment;
pub mod github;
pub mod output;
pub mod preview;
pub mod projects;
pub mod readme;
pub mod runner;
pub mod summary;

pub use config::{load_settings, ConfigError, PortfolioSettings, DEFAULT_OWNER, TOKEN_ENV_VAR};
pub use discovery::{
    discover_candidates, select_repositories, Discovery, DiscoveryError, Selection,
};
pub use endpoint::{create_router, respond, serve, AppState};
pub use enrichment::{enrich_repository, Enrichment, ReadmeStatus};
pub use github::{
    ClientError, EncodedReadme, GitHubApi, LanguageBreakdown, OctocrabApi, RepositorySummary,
    TransportError,
};
pub use output::{write_projects, OutputError};
pub use preview::{preview_url, resolve_preview};
pub use projects::{assemble_project, AggregationResult, HeaderPolicy, ProjectRecord};
pub use readme::{decode_payload, decode_readme, parse_header, DecodeError, ReadmeHeader};
pub use runner::{RunReport, Runner, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
