//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Opaque failure from a data service or auth provider.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body written for every render-phase failure. Internal detail stays in the logs.
pub const RENDER_ERROR_BODY: &str = "Template render error";

/// Failure reported by a loader or a view's `load`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Service(#[from] BoxError),
    /// The loader already wrote the response and also has an error to report.
    /// Finishing wins: nothing is rendered, the inner error is only logged.
    #[error("{0} (response already written)")]
    AfterFinish(Box<LoadError>),
}

impl LoadError {
    pub fn msg(message: impl Into<String>) -> Self {
        LoadError::Message(message.into())
    }

    /// Mark this error as reported after the response was finished.
    pub fn after_finish(self) -> Self {
        match self {
            e @ LoadError::AfterFinish(_) => e,
            e => LoadError::AfterFinish(Box::new(e)),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, LoadError::AfterFinish(_))
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template {file}[{block}]: {source}")]
    Template {
        file: String,
        block: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("no template environment or render function configured")]
    NotConfigured,
    #[error("render: {0}")]
    Custom(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl IntoResponse for LoadError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, RENDER_ERROR_BODY).into_response()
    }
}
