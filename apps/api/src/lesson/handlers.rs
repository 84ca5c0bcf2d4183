use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::lesson::directives::DirectiveKind;
use crate::lesson::models::ParsedLessonActions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseLessonRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseLessonResponse {
    #[serde(flatten)]
    pub parsed: ParsedLessonActions,
    /// A mini test was dropped and the tutor should be asked to re-emit it.
    pub needs_correction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    /// Directives left in `content` because they could not be parsed.
    pub rejections: Vec<RejectedDirective>,
}

#[derive(Debug, Serialize)]
pub struct RejectedDirective {
    pub directive: DirectiveKind,
    pub start: usize,
    pub end: usize,
    pub reason: String,
}

/// POST /api/v1/lessons/parse
pub async fn handle_parse_lesson(
    State(state): State<AppState>,
    Json(req): Json<ParseLessonRequest>,
) -> Result<Json<ParseLessonResponse>, AppError> {
    let report = state.lesson_parser.parse_report(&req.content);
    let correction_message = report.correction_message();
    let user_message = report.user_message();

    info!(
        content_len = req.content.len(),
        actions = report.parsed.actions.len(),
        rejected = report.rejections.len(),
        needs_correction = correction_message.is_some(),
        "lesson message parsed"
    );

    Ok(Json(ParseLessonResponse {
        needs_correction: correction_message.is_some(),
        correction_message,
        user_message,
        rejections: report
            .rejections
            .iter()
            .map(|r| RejectedDirective {
                directive: r.directive,
                start: r.span.start,
                end: r.span.end,
                reason: r.reason.to_string(),
            })
            .collect(),
        parsed: report.parsed,
    }))
}
