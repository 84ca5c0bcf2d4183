use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::code_check::models::{CodeValidationResult, Language};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateCodeRequest {
    pub code: String,
    pub language: String,
}

/// POST /api/v1/code/validate
pub async fn handle_validate_code(
    State(state): State<AppState>,
    Json(req): Json<ValidateCodeRequest>,
) -> Result<Json<CodeValidationResult>, AppError> {
    let language: Language = req
        .language
        .parse()
        .map_err(|e| AppError::Validation(format!("{e}")))?;

    let result = state.code_validator.validate(&req.code, language);
    info!(
        %language,
        code_len = req.code.len(),
        is_valid = result.is_valid,
        "code completeness checked"
    );
    Ok(Json(result))
}
