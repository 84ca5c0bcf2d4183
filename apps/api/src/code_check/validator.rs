//! Dispatches submitted code to the rule registered for its language.

use std::collections::HashMap;

use tracing::debug;

use crate::code_check::lexer::SourceView;
use crate::code_check::models::{CodeValidationResult, Findings, Language};
use crate::code_check::rules::{builtin_rules, LanguageRule};

/// Registry of language rules.
///
/// New languages are added by registering another [`LanguageRule`];
/// nothing here needs to change.
pub struct CodeValidator {
    rules: HashMap<Language, Box<dyn LanguageRule>>,
}

impl CodeValidator {
    /// A validator with no rules; every non-empty submission passes.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Adds or replaces the rule for the rule's language.
    pub fn register(&mut self, rule: Box<dyn LanguageRule>) {
        self.rules.insert(rule.language(), rule);
    }

    pub fn validate(&self, code: &str, language: Language) -> CodeValidationResult {
        if code.trim().is_empty() {
            return CodeValidationResult::empty_code();
        }

        let Some(rule) = self.rules.get(&language) else {
            debug!(%language, "no rule registered; accepting code as-is");
            return Findings::default().into_result();
        };

        let source = SourceView::new(code, language);
        let mut findings = Findings::default();
        rule.check_entry_point(&source, &mut findings);
        rule.check_imports(&source, &mut findings);
        rule.check_definitions(&source, &mut findings);
        rule.check_style(&source, &mut findings);

        let result = findings.into_result();
        debug!(
            %language,
            is_valid = result.is_valid,
            errors = result.errors.len(),
            suggestions = result.suggestions.len(),
            "code validated"
        );
        result
    }
}

impl Default for CodeValidator {
    fn default() -> Self {
        let mut validator = Self::empty();
        for rule in builtin_rules() {
            validator.register(rule);
        }
        validator
    }
}
