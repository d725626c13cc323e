//! Shared API state and error envelope

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::contract::ContractService;
use crate::services::export::ExportError;
use crate::services::generation::ServiceError;
use crate::services::markdown::MarkdownRenderer;
use crate::templates::{PageRenderer, TemplateError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub contract_service: Arc<ContractService>,
    pub markdown: Arc<MarkdownRenderer>,
    pub pages: Arc<PageRenderer>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// The generation service failed; the message is kept verbatim
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::new("GENERATION_FAILED", message)
    }

    pub fn export_failed(message: impl Into<String>) -> Self {
        Self::new("EXPORT_FAILED", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "GENERATION_FAILED" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or invalid request bodies, such as an unknown auth method label
impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::validation_error(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation_error(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::generation_failed(e.message())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        Self::export_failed(e.to_string())
    }
}

impl From<TemplateError> for ApiError {
    fn from(e: TemplateError) -> Self {
        tracing::error!("Page rendering failed: {}", e);
        Self::internal_error(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
