//! Duplicate question suppression.
//!
//! Two questions are the same when their text matches and they offer the same
//! set of options, ignoring case, surrounding whitespace and option order.

use std::collections::HashSet;

use crate::lesson::models::Question;

pub fn question_key(question: &Question) -> String {
    let mut options: Vec<String> = question
        .options
        .iter()
        .map(|o| o.trim().to_lowercase())
        .collect();
    options.sort();
    format!(
        "{}::{}",
        question.text.trim().to_lowercase(),
        options.join("|")
    )
}

#[derive(Debug, Default)]
pub struct SeenQuestions {
    keys: HashSet<String>,
}

impl SeenQuestions {
    /// Returns `true` the first time a question is seen.
    pub fn insert(&mut self, question: &Question) -> bool {
        self.keys.insert(question_key(question))
    }
}
