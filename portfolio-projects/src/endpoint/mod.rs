//! HTTP endpoint serving the projects document.
//!
//! Every request runs the pipeline from scratch; nothing is cached between
//! requests.

mod response;

pub use response::{from_runner_error, EndpointResponse, ErrorBody};

use crate::runner::Runner;
use axum::extract::State;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Route served by the endpoint.
pub const PROJECTS_ROUTE: &str = "/api/github";

/// Route the existing front-end fetches.
pub const LEGACY_ROUTE: &str = "/.netlify/functions/github";

/// State shared by the handlers.
#[derive(Clone)]
pub struct AppState {
    pub runner: Runner,
}

/// Builds the router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(PROJECTS_ROUTE, get(projects_handler))
        .route(LEGACY_ROUTE, get(projects_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        .with_state(state)
}

/// Binds `addr` and serves until the process stops.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, create_router(state)).await
}

async fn projects_handler(State(state): State<AppState>) -> EndpointResponse {
    respond(&state.runner).await
}

/// Runs the pipeline and maps the outcome to a response.
pub async fn respond(runner: &Runner) -> EndpointResponse {
    match runner.run().await {
        Ok(report) => response::success(&report.result),
        Err(e) => {
            error!(error = %e, "Projects request failed");
            from_runner_error(&e)
        }
    }
}
