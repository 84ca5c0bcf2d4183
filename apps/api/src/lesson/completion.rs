//! Step progress and lesson completion signals.

use std::sync::OnceLock;

use regex::Regex;

use crate::lesson::models::{Progress, StepStatus};
use crate::util::cached_regex;

/// Chars after a completion phrase that are searched for a `?`.
const QUESTION_WINDOW: usize = 10;
/// Chars before a completion phrase that are searched for a conditional word.
const CONDITIONAL_WINDOW: usize = 20;

const COMPLETION_PHRASES: &str = r"(?i)(?:ders\s+tamamlandı|ders\s+bitti|dersi\s+bitirdin|dersi\s+tamamladın|ders\s+tamam|dersimiz\s+tamamlandı|dersimizi\s+bitirdik|dersi\s+tamamladık|ders\s+sona\s+erdi)\b[!.]?";

/// Folds CURRENT_STEP / STEP_COMPLETE signals into a single progress report.
///
/// The last signal of each kind wins, and a completed step is never reported
/// as merely in progress.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    current: Option<u32>,
    completed: Option<u32>,
}

impl ProgressTracker {
    pub fn current_step(&mut self, step: u32) {
        self.current = Some(step);
    }

    pub fn step_complete(&mut self, step: u32) {
        self.completed = Some(step);
    }

    pub fn progress(&self) -> Option<Progress> {
        match (self.completed, self.current) {
            (Some(step), _) => Some(Progress {
                step,
                status: StepStatus::Completed,
            }),
            (None, Some(step)) => Some(Progress {
                step,
                status: StepStatus::InProgress,
            }),
            (None, None) => None,
        }
    }
}

/// True when the text announces the end of the lesson in plain words.
///
/// A phrase followed closely by a question mark, or preceded closely by a
/// conditional ("eğer", "ne zaman", "if", "when"), does not count.
pub fn announces_completion(text: &str) -> bool {
    static PHRASES: OnceLock<Regex> = OnceLock::new();
    static CONDITIONAL: OnceLock<Regex> = OnceLock::new();
    let phrases = cached_regex(&PHRASES, COMPLETION_PHRASES);
    let conditional = cached_regex(&CONDITIONAL, r"(?i)\b(?:eğer|if|when|ne\s+zaman)\b");

    phrases.find_iter(text).any(|m| {
        let after: String = text[m.end()..].chars().take(QUESTION_WINDOW).collect();
        let before = tail_chars(&text[..m.start()], CONDITIONAL_WINDOW);
        !after.contains('?') && !conditional.is_match(before)
    })
}

fn tail_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) if n > 0 => &s[idx..],
        _ if n == 0 => "",
        _ => s,
    }
}
