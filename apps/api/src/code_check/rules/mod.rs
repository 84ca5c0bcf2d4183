//! Per-language completeness rules.
//!
//! Each language implements [`LanguageRule`]. The validator runs the checks in
//! a fixed order: entry point, imports, definitions, then advisory hints.
//! Every check defaults to a no-op so a rule only overrides what its language
//! needs.

pub mod compiled;
pub mod dynamic;
pub mod php;
pub mod python;

use regex::Regex;

use crate::code_check::lexer::SourceView;
use crate::code_check::models::{Findings, Language, ValidationIssue};

pub trait LanguageRule: Send + Sync {
    fn language(&self) -> Language;

    /// Required program entry point (e.g. `fn main(`).
    fn check_entry_point(&self, _source: &SourceView<'_>, _findings: &mut Findings) {}

    /// Imports or includes that the code relies on.
    fn check_imports(&self, _source: &SourceView<'_>, _findings: &mut Findings) {}

    /// Names used without being defined.
    fn check_definitions(&self, _source: &SourceView<'_>, _findings: &mut Findings) {}

    /// Advisory suggestions that never affect validity.
    fn check_style(&self, _source: &SourceView<'_>, _findings: &mut Findings) {}
}

/// Records a hard finding unless `pattern` matches `haystack`.
pub(crate) fn require(
    findings: &mut Findings,
    haystack: &str,
    pattern: &Regex,
    missing: &str,
    description: &str,
) {
    if !pattern.is_match(haystack) {
        findings.hard(missing, ValidationIssue::new(description));
    }
}

/// Every built-in rule, one per supported language.
pub fn builtin_rules() -> Vec<Box<dyn LanguageRule>> {
    vec![
        Box::new(php::PhpRule),
        Box::new(python::PythonRule),
        Box::new(dynamic::JavaScriptRule),
        Box::new(dynamic::TypeScriptRule),
        Box::new(dynamic::RubyRule),
        Box::new(compiled::JavaRule),
        Box::new(compiled::CSharpRule),
        Box::new(compiled::GoRule),
        Box::new(compiled::RustRule),
        Box::new(compiled::CppRule),
        Box::new(compiled::KotlinRule),
    ]
}
