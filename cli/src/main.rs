//! CLI for the portfolio projects feed.
//!
//! `generate` runs the pipeline once and writes the JSON document to disk;
//! `serve` answers HTTP requests with a freshly built document.

use clap::{Args as ClapArgs, Parser, Subcommand};
use portfolio_projects::{
    load_settings, serve, write_projects, AppState, ConfigError, OctocrabApi, PortfolioSettings,
    ProcessingResult, RunReport, Runner, RunnerError,
};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Portfolio Projects - Build the portfolio project feed from GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a portfolio.toml settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub account whose repositories are listed.
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Number of README lines scanned for the header.
    #[arg(long, global = true)]
    readme_window: Option<usize>,

    /// Maximum concurrent repository enrichments.
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the projects document to a file.
    Generate(GenerateArgs),

    /// Serve the projects document over HTTP.
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug)]
struct GenerateArgs {
    /// Output file (defaults to the `output` setting).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Consider every repository instead of only tagged ones.
    #[arg(long)]
    all_repositories: bool,

    /// Skip repositories whose README header is incomplete.
    #[arg(long)]
    require_header: bool,
}

#[derive(ClapArgs, Debug)]
struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

/// Failures that end the process.
#[derive(Debug)]
enum Failure {
    Config(ConfigError),
    Runtime(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Both octocrab and reqwest go through rustls
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(Failure::Config(e)) => {
            error!(error = %e, "Invalid configuration");
            ExitCode::from(2)
        }
        Err(Failure::Runtime(e)) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), Failure> {
    let settings = build_settings(&args).map_err(Failure::Config)?;

    match args.command {
        Command::Generate(_) => run_generate(settings).await,
        Command::Serve(serve_args) => run_serve(settings, serve_args).await,
    }
}

/// Layers CLI flags over the settings file and environment.
fn build_settings(args: &Args) -> Result<PortfolioSettings, ConfigError> {
    let mut settings = load_settings(args.config.as_deref())?;

    if let Some(token) = &args.token {
        settings = settings.with_token(Some(token.clone()));
    }
    if let Some(owner) = &args.owner {
        settings.owner = owner.clone();
    }
    if let Some(window) = args.readme_window {
        settings.readme_window = window;
    }
    if let Some(concurrency) = args.concurrency {
        settings.concurrency = concurrency;
    }
    if let Command::Generate(generate) = &args.command {
        settings.all_repositories |= generate.all_repositories;
        settings.require_header |= generate.require_header;
        if let Some(output) = &generate.output {
            settings.output = output.clone();
        }
    }

    settings.validate("command line")?;
    Ok(settings)
}

async fn run_generate(settings: PortfolioSettings) -> Result<(), Failure> {
    let output = settings.output.clone();
    let runner = Runner::new(settings).map_err(|e| match e {
        RunnerError::Config(e) => Failure::Config(e),
        other => Failure::Runtime(other.to_string()),
    })?;

    let report = runner
        .run()
        .await
        .map_err(|e| Failure::Runtime(e.to_string()))?;

    write_projects(&output, &report.result).map_err(|e| Failure::Runtime(e.to_string()))?;
    print_summary(&report);
    Ok(())
}

async fn run_serve(settings: PortfolioSettings, args: ServeArgs) -> Result<(), Failure> {
    if settings.token.is_none() {
        warn!("GITHUB_TOKEN is not set, requests will fail with 500");
    }

    let api = OctocrabApi::new(&settings).map_err(|e| Failure::Runtime(e.to_string()))?;
    let state = AppState {
        runner: Runner::with_api(settings, Arc::new(api)),
    };

    let addr = SocketAddr::new(args.host, args.port);
    serve(addr, state)
        .await
        .map_err(|e| Failure::Runtime(format!("Server error on {addr}: {e}")))
}

/// Prints the final run summary.
fn print_summary(report: &RunReport) {
    let summary = &report.summary;
    println!("\nSummary:");
    println!("  Repositories listed: {}", summary.repositories_listed);
    println!("  Candidates: {}", summary.candidates);
    println!("  Projects written: {}", report.result.count());
    println!("  Degraded: {}", summary.projects_degraded);
    println!("  Skipped: {}", summary.projects_skipped);

    if !summary.has_problems() {
        return;
    }

    for outcome in &report.outcomes {
        match outcome {
            ProcessingResult::Skipped { repository, reason } => {
                println!("    - {repository}: skipped ({reason})");
            }
            ProcessingResult::Included {
                repository,
                warnings,
            } => {
                for warning in warnings {
                    println!("    - {repository}: {warning}");
                }
            }
        }
    }
}
