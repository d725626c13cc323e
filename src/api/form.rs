//! HTML form pages
//!
//! - GET / - Input form with defaults
//! - POST /generate - Generate and show the result page

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::ContractRequest;

/// GET /
pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state.pages.render_form(&ContractRequest::default(), None)?;
    Ok(Html(html))
}

/// POST /generate
///
/// On failure the form comes back with the submitted values and the error.
/// A body that does not decode (such as an unknown auth method) is a 400.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<ContractRequest>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(request) = form?;
    match state.contract_service.generate(request.clone()).await {
        Ok(contract) => {
            let preview = state.markdown.render(&contract.content);
            let html = state.pages.render_result(&contract, &preview)?;
            Ok(Html(html).into_response())
        }
        Err(e) => {
            let html = state.pages.render_form(&request, Some(e.message()))?;
            Ok((StatusCode::BAD_GATEWAY, Html(html)).into_response())
        }
    }
}
