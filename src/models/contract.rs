//! Contract request, generated contract and export artifact models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication method offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthMethod {
    #[default]
    JwtBearer,
    ApiKey,
    BasicAuth,
}

impl AuthMethod {
    /// All methods, in the order the form lists them
    pub const ALL: [AuthMethod; 3] = [Self::JwtBearer, Self::ApiKey, Self::BasicAuth];

    /// Human-readable label, also used on the wire
    pub fn label(&self) -> &'static str {
        match self {
            Self::JwtBearer => "JWT Bearer",
            Self::ApiKey => "API Key",
            Self::BasicAuth => "Basic Auth",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for labels outside the closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown authentication method: {0}")]
pub struct UnknownAuthMethod(pub String);

impl std::str::FromStr for AuthMethod {
    type Err = UnknownAuthMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownAuthMethod(s.to_string()))
    }
}

impl TryFrom<String> for AuthMethod {
    type Error = UnknownAuthMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AuthMethod> for String {
    fn from(method: AuthMethod) -> Self {
        method.label().to_string()
    }
}

/// Metadata collected from one form submission
///
/// Missing fields take the form defaults. Empty strings are valid and are
/// passed through to the prompt unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRequest {
    pub api_name: String,
    pub version: String,
    pub base_url: String,
    pub auth_method: AuthMethod,
    pub content_type: String,
    pub response_format: String,
    pub auth_header_example: String,
    pub global_headers: String,
    pub entities: String,
    pub endpoints: String,
}

impl Default for ContractRequest {
    fn default() -> Self {
        Self {
            api_name: "Task Management API".to_string(),
            version: "v1.0.0".to_string(),
            base_url: "https://api.taskhub.com/v1".to_string(),
            auth_method: AuthMethod::default(),
            content_type: "application/json".to_string(),
            response_format: "application/json".to_string(),
            auth_header_example: "Authorization: Bearer <token>".to_string(),
            global_headers: default_global_headers(),
            entities: default_entities(),
            endpoints: default_endpoints(),
        }
    }
}

fn default_global_headers() -> String {
    [
        "- Authorization: string (required) - JWT access token",
        "- Content-Type: string (required) - MIME type",
    ]
    .join("\n")
}

fn default_entities() -> String {
    [
        "- Task: title, description, dueDate, priority, status",
        "- Project: name, description, owner",
        "- User: name, email, role",
    ]
    .join("\n")
}

fn default_endpoints() -> String {
    [
        "- POST `/tasks` - Create a new task",
        "- GET `/tasks/{id}` - Get task by ID",
        "- PUT `/tasks/{id}` - Update a task",
        "- DELETE `/tasks/{id}` - Delete a task",
        "- GET `/projects` - List all projects",
        "- POST `/users/login` - Login and get token",
    ]
    .join("\n")
}

/// Text returned by the generation service for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContract {
    /// Markdown content, trimmed
    pub content: String,
    pub success: bool,
}

impl GeneratedContract {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }
}

/// Downloadable document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered document ready to be written or downloaded
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
}
