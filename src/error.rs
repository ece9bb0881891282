// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure talking to one of the upstream backends.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0} credential is not configured")]
    ConfigurationMissing(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("cannot build endpoint from base url {0}")]
    InvalidEndpoint(String),
}

impl BackendError {
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, BackendError::ConfigurationMissing(_))
    }
}

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
