use std::sync::Arc;

use crate::code_check::validator::CodeValidator;
use crate::lesson::parser::LessonParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Directive parser with the configured filler table and mini-test validator.
    pub lesson_parser: Arc<LessonParser>,
    /// Pluggable per-language rules. Default: the built-in rule set.
    pub code_validator: Arc<CodeValidator>,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests() -> Self {
        AppState {
            lesson_parser: Arc::new(LessonParser::default()),
            code_validator: Arc::new(CodeValidator::default()),
        }
    }
}
