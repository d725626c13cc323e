//! Prompt builder
//!
//! Turns a [`ContractRequest`] into the single instruction string sent to the
//! generation service. The ten-section outline and its order are fixed.
//!
//! Field values are substituted verbatim. Nothing is escaped or validated, so
//! markdown typed into the free-text fields reaches the model unchanged.

use crate::models::ContractRequest;

/// Section titles, in outline order
pub const SECTION_TITLES: [&str; 10] = [
    "API Overview",
    "Authentication",
    "Global Headers",
    "Error Handling",
    "Endpoints",
    "Data Types",
    "Rate Limiting",
    "Changelog",
    "Appendix",
    "Contact & Support",
];

const PREAMBLE: &str = "You are an expert technical writer and backend architect. \
I need you to generate a complete API contract documentation for a RESTful API, \
following the structure and level of detail used by professional API teams.

Generate the API documentation in the following format:

---

";

const CLOSING: &str = "Use Markdown formatting and professional tone.
Include JSON examples and tables where needed.
";

/// Format the numbered, bolded header of a section (`1. **API Overview**`)
pub fn section_header(index: usize, title: &str) -> String {
    format!("{}. **{}**", index + 1, title)
}

/// Build the generation prompt for a request.
///
/// Total and deterministic: every request, including one with only empty
/// fields, produces the same outline.
pub fn build_prompt(request: &ContractRequest) -> String {
    let bodies = section_bodies(request);

    let mut prompt = String::from(PREAMBLE);
    for (index, (title, body)) in SECTION_TITLES.iter().zip(bodies.iter()).enumerate() {
        prompt.push_str(&section_header(index, title));
        prompt.push('\n');
        prompt.push_str(body);
        prompt.push_str("\n\n");
    }

    prompt.push_str("---\n\n**Main Entities**:\n");
    prompt.push_str(&request.entities);
    prompt.push_str("\n\n");
    prompt.push_str(CLOSING);
    prompt
}

fn section_bodies(request: &ContractRequest) -> [String; 10] {
    [
        format!(
            "   - API Name: {}\n   - Version: {}\n   - Base URL: {}\n   - Authentication method: {}\n   - Content-Type: {}\n   - Response Format: {}",
            request.api_name,
            request.version,
            request.base_url,
            request.auth_method,
            request.content_type,
            request.response_format,
        ),
        format!(
            "   - Type: {}\n   - Example Authorization Header: {}",
            request.auth_method, request.auth_header_example,
        ),
        format!(
            "Include a table of common headers required across all endpoints\n{}",
            request.global_headers,
        ),
        "   - List common HTTP status codes (e.g., 400, 401, 403, 404, 500)\n   \
         - Include common HTTP status codes\n   \
         - Standard error JSON structure"
            .to_string(),
        format!(
            "   Based on the following definitions:\n{}\n{}",
            request.endpoints, ENDPOINT_CHECKLIST,
        ),
        "   - Provide a table describing custom object types, enums, and field descriptions\n   \
         - Use a table to describe types"
            .to_string(),
        "Maximum requests per minute/hour\n\n\
         Rate limiting headers to be monitored\n   \
         - Requests per minute/hour\n   \
         - Rate limit headers"
            .to_string(),
        "   Example:\n\n   v1.0.0 – Initial release with basic CRUD endpoints".to_string(),
        "   - Security considerations\n   - Environment URLs (e.g., Production, Staging)".to_string(),
        "    - Add dummy email and repo link".to_string(),
    ]
}

const ENDPOINT_CHECKLIST: &str = "For example each endpoint can include based on the need:

Method: GET / POST / PUT / DELETE

Endpoint URL

Description

Path Parameters (if any)

Query Parameters (if any)

Headers (if specific to endpoint)

Request Body

JSON Schema or field-level description

Example request in JSON

Response Body

JSON Schema or field-level description

Example response in JSON

Success HTTP Status Code(s)

Error HTTP Status Codes

Notes (if any)";
