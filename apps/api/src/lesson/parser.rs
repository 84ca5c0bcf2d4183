//! Lesson directive parser: turns one tutor message into visible text plus
//! structured actions.
//!
//! The message is scanned once, left to right. Each accepted directive is
//! consumed whole (including anything nested inside it) and its span queued
//! for removal; a rejected directive is logged and left in the text.

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::lesson::completion::{announces_completion, ProgressTracker};
use crate::lesson::dedup::SeenQuestions;
use crate::lesson::directives::{
    find_next, parse_payload, Directive, DirectiveError, DirectiveHead, DirectiveKind,
};
use crate::lesson::mini_test::{
    correction_prompt, user_error_message, MiniTestValidation, MiniTestValidator,
    StrictMiniTestValidator,
};
use crate::lesson::models::{Action, ParsedLessonActions};
use crate::lesson::sanitizer::Sanitizer;
use crate::util::trunc_for_log;

/// A directive occurrence that was found but not turned into output.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub directive: DirectiveKind,
    /// Byte range of the directive head, or of the whole directive when it closed.
    pub span: Range<usize>,
    pub reason: DirectiveError,
}

#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub parsed: ParsedLessonActions,
    pub rejections: Vec<Rejection>,
}

impl ParseReport {
    /// Instructions for the tutor model when one of its mini tests was unusable.
    pub fn correction_message(&self) -> Option<String> {
        self.failed_mini_tests().next().map(correction_prompt)
    }

    /// Short learner-facing explanation for the first unusable mini test.
    pub fn user_message(&self) -> Option<String> {
        self.failed_mini_tests().next().map(user_error_message)
    }

    fn failed_mini_tests(&self) -> impl Iterator<Item = &MiniTestValidation> {
        self.rejections.iter().filter_map(|r| match &r.reason {
            DirectiveError::FailedValidation(v) => Some(v),
            _ => None,
        })
    }
}

#[derive(Clone)]
pub struct LessonParser {
    sanitizer: Sanitizer,
    mini_tests: Arc<dyn MiniTestValidator>,
}

impl LessonParser {
    pub fn new(sanitizer: Sanitizer, mini_tests: Arc<dyn MiniTestValidator>) -> Self {
        Self {
            sanitizer,
            mini_tests,
        }
    }

    pub fn parse(&self, text: &str) -> ParsedLessonActions {
        self.parse_report(text).parsed
    }

    /// Locates and parses one directive. On failure, the span is known only
    /// when the directive closed.
    fn accept(
        &self,
        text: &str,
        head: &DirectiveHead,
    ) -> Result<(Range<usize>, Directive), (Option<Range<usize>>, DirectiveError)> {
        let located = head.locate(text).map_err(|reason| (None, reason))?;
        match parse_payload(head.kind, located.payload, self.mini_tests.as_ref()) {
            Ok(directive) => Ok((located.span, directive)),
            Err(reason) => Err((Some(located.span), reason)),
        }
    }

    pub fn parse_report(&self, text: &str) -> ParseReport {
        let mut parsed = ParsedLessonActions::default();
        let mut progress = ProgressTracker::default();
        let mut seen = SeenQuestions::default();
        let mut lesson_complete = false;
        let mut spans: Vec<Range<usize>> = Vec::new();
        let mut rejections = Vec::new();

        let mut cursor = 0;
        while let Some(head) = find_next(text, cursor) {
            match self.accept(text, &head) {
                Ok((span, directive)) => {
                    cursor = span.end;
                    match directive {
                        Directive::Roadmap(roadmap) => parsed.roadmap = Some(roadmap),
                        Directive::CurrentStep(step) => progress.current_step(step),
                        Directive::StepComplete(step) => progress.step_complete(step),
                        Directive::LessonComplete => lesson_complete = true,
                        Directive::Image(query) => parsed.images.push(query),
                        Directive::Action(Action::MiniTest(data)) => {
                            if seen.insert(&data.question) {
                                parsed.actions.push(Action::MiniTest(data));
                            } else {
                                debug!(
                                    question = %trunc_for_log(&data.question.text, 60),
                                    "duplicate mini test dropped"
                                );
                            }
                        }
                        Directive::Action(action) => parsed.actions.push(action),
                    }
                    spans.push(span);
                }
                Err((span, reason)) => {
                    warn!(
                        directive = head.kind.name(),
                        offset = head.start,
                        error = %reason,
                        snippet = %trunc_for_log(&text[head.start..], 80),
                        "directive rejected"
                    );
                    rejections.push(Rejection {
                        directive: head.kind,
                        span: span.unwrap_or(head.start..head.end),
                        reason,
                    });
                    cursor = head.end;
                }
            }
        }

        parsed.progress = progress.progress();
        parsed.is_completed = lesson_complete || announces_completion(text);
        parsed.content = self.sanitizer.clean(text, &spans);

        debug!(
            actions = parsed.actions.len(),
            images = parsed.images.len(),
            rejected = rejections.len(),
            is_completed = parsed.is_completed,
            "lesson message parsed"
        );
        ParseReport { parsed, rejections }
    }
}

impl Default for LessonParser {
    fn default() -> Self {
        Self::new(Sanitizer::default(), Arc::new(StrictMiniTestValidator))
    }
}
