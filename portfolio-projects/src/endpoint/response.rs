//! Response bodies for the projects endpoint.

use crate::runner::RunnerError;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Status and JSON body returned by the endpoint.
pub type EndpointResponse = (StatusCode, Json<Value>);

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// `200` with `body`.
pub fn success<T: Serialize>(body: &T) -> EndpointResponse {
    match serde_json::to_value(body) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to serialize projects",
            Some(e.to_string()),
        ),
    }
}

/// Error status with an `{error, detail?}` body.
pub fn error(status: StatusCode, message: &str, detail: Option<String>) -> EndpointResponse {
    let body = ErrorBody {
        error: message.to_string(),
        detail,
    };
    let value = serde_json::to_value(body).unwrap_or(Value::Null);
    (status, Json(value))
}

/// Maps a failed run to its response.
///
/// A missing credential is a server misconfiguration (`500`); anything that
/// went wrong talking to GitHub is a bad gateway (`502`).
pub fn from_runner_error(err: &RunnerError) -> EndpointResponse {
    match err {
        RunnerError::Config(e) => error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string(), None),
        RunnerError::Discovery(e) => error(
            StatusCode::BAD_GATEWAY,
            "Failed to query GitHub",
            Some(e.to_string()),
        ),
        RunnerError::Client(e) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to initialise GitHub client",
            Some(e.to_string()),
        ),
    }
}
