//! Shared API request and response types

use serde::{Deserialize, Serialize};

use crate::models::ExportFormat;

/// Generated contract with its rendered preview
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractResponse {
    pub content: String,
    pub html: String,
    pub success: bool,
}

/// The exact instruction that would be sent to the generation service
#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// JSON export request
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRequest {
    pub content: String,
    pub format: ExportFormat,
}

/// Download form posted from the result page
#[derive(Debug, Deserialize)]
pub struct ExportForm {
    #[serde(default)]
    pub content: String,
}
