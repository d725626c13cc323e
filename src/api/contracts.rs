//! Contract API endpoints
//!
//! - GET /api/v1/defaults - Default form values
//! - POST /api/v1/contracts - Generate a contract
//! - POST /api/v1/contracts/prompt - Show the prompt for a request

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{ContractResponse, PromptResponse};
use crate::models::ContractRequest;
use crate::services::prompt::build_prompt;

/// Build the contracts router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/defaults", get(get_defaults))
        .route("/contracts", post(generate_contract))
        .route("/contracts/prompt", post(preview_prompt))
}

/// GET /api/v1/defaults
async fn get_defaults() -> Json<ContractRequest> {
    Json(ContractRequest::default())
}

/// POST /api/v1/contracts
async fn generate_contract(
    State(state): State<AppState>,
    body: Result<Json<ContractRequest>, JsonRejection>,
) -> Result<Json<ContractResponse>, ApiError> {
    let Json(request) = body?;
    let contract = state.contract_service.generate(request).await?;
    let html = state.markdown.render(&contract.content);

    Ok(Json(ContractResponse {
        content: contract.content,
        html,
        success: contract.success,
    }))
}

/// POST /api/v1/contracts/prompt
async fn preview_prompt(
    body: Result<Json<ContractRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(PromptResponse {
        prompt: build_prompt(&request),
    }))
}
