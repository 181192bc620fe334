use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use render::RenderError;
use thiserror::Error;
use tracing::{error, warn};

use crate::provider::ProviderError;
use crate::schemas::ErrorResponse;

/// Failures of a heatmap request, each mapped to one HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Data provider unreachable, failing, or answering with unusable data
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Nothing to draw for the branch
    #[error("No load data available for branch '{0}'")]
    NoLoadData(String),

    /// Renderer failed to produce an image
    #[error("Failed to render heatmap: {0}")]
    Render(#[from] RenderError),

    /// Blocking render task panicked or was cancelled
    #[error("Rendering task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Provider(e) if e.is_upstream_failure() => StatusCode::BAD_GATEWAY,
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoLoadData(_) => StatusCode::NOT_FOUND,
            AppError::Render(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Provider(e) if e.is_upstream_failure() => "UPSTREAM_ERROR",
            AppError::Provider(_) => "INVALID_UPSTREAM_DATA",
            AppError::NoLoadData(_) => "NO_LOAD_DATA",
            AppError::Render(_) | AppError::Task(_) => "RENDER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), "{}", self);
        } else {
            warn!(code = self.code(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
