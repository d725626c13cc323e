//! Page template error types

use thiserror::Error;

/// Template loading and rendering errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Embedded template missing from the binary
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template is not valid UTF-8
    #[error("Template '{0}' is not valid UTF-8")]
    InvalidEncoding(String),

    /// Tera parse or render failure, with its cause chain
    #[error("Template error: {0}")]
    Render(String),
}
