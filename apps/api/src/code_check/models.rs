use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Languages accepted by the live-coding editor and the completeness validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Php,
    Python,
    Javascript,
    Java,
    Csharp,
    Typescript,
    Go,
    Rust,
    Cpp,
    Kotlin,
    Ruby,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::Php,
        Language::Python,
        Language::Javascript,
        Language::Java,
        Language::Csharp,
        Language::Typescript,
        Language::Go,
        Language::Rust,
        Language::Cpp,
        Language::Kotlin,
        Language::Ruby,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Php => "php",
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Java => "java",
            Language::Csharp => "csharp",
            Language::Typescript => "typescript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::Kotlin => "kotlin",
            Language::Ruby => "ruby",
        }
    }

    /// Languages a tutor may open a live-coding or bug-fix task in.
    pub fn supports_live_coding(&self) -> bool {
        matches!(
            self,
            Language::Csharp | Language::Python | Language::Javascript | Language::Java
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == wanted)
            .ok_or_else(|| UnknownLanguage(s.trim().to_string()))
    }
}

/// A single problem found in submitted code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based line, when one specific line is implicated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub description: String,
}

impl ValidationIssue {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            line: None,
            description: description.into(),
        }
    }

    pub fn at_line(line: usize, description: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeValidationResult {
    pub is_valid: bool,
    pub is_complete: bool,
    pub missing_elements: Vec<String>,
    pub suggestions: Vec<String>,
    pub errors: Vec<ValidationIssue>,
}

impl CodeValidationResult {
    pub fn empty_code() -> Self {
        Self {
            is_valid: false,
            is_complete: false,
            missing_elements: vec!["Kod boş".to_string()],
            suggestions: vec!["Kod içeriği eklenmeli".to_string()],
            errors: vec![ValidationIssue::new("Kod boş")],
        }
    }
}

/// Accumulates findings while a rule runs.
///
/// A hard finding records both a missing element and an error and makes the
/// result invalid. Suggestions never affect validity.
#[derive(Debug, Default)]
pub struct Findings {
    missing: Vec<String>,
    suggestions: Vec<String>,
    errors: Vec<ValidationIssue>,
    incomplete: bool,
}

impl Findings {
    pub fn hard(&mut self, missing: impl Into<String>, error: ValidationIssue) {
        self.missing.push(missing.into());
        self.errors.push(error);
    }

    pub fn suggest(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }

    /// Marks the code as incomplete without making it invalid.
    pub fn mark_incomplete(&mut self) {
        self.incomplete = true;
    }

    pub fn into_result(self) -> CodeValidationResult {
        let is_valid = self.missing.is_empty();
        CodeValidationResult {
            is_valid,
            is_complete: is_valid && !self.incomplete,
            missing_elements: self.missing,
            suggestions: self.suggestions,
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parses_case_insensitively() {
        assert_eq!("CSharp".parse::<Language>(), Ok(Language::Csharp));
        assert_eq!(" go ".parse::<Language>(), Ok(Language::Go));
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde_is_lowercase() {
        let json = serde_json::to_string(&Language::Typescript).unwrap();
        assert_eq!(json, r#""typescript""#);
        let lang: Language = serde_json::from_str(r#""cpp""#).unwrap();
        assert_eq!(lang, Language::Cpp);
    }

    #[test]
    fn test_live_coding_support_is_limited_to_four() {
        let supported: Vec<_> = Language::ALL
            .iter()
            .filter(|l| l.supports_live_coding())
            .collect();
        assert_eq!(supported.len(), 4);
        assert!(!Language::Rust.supports_live_coding());
    }

    #[test]
    fn test_findings_suggestions_only_stay_valid() {
        let mut f = Findings::default();
        f.suggest("add output");
        f.suggest("add output");
        let r = f.into_result();
        assert!(r.is_valid);
        assert!(r.is_complete);
        assert_eq!(r.suggestions.len(), 1);
    }

    #[test]
    fn test_findings_hard_error_invalidates() {
        let mut f = Findings::default();
        f.hard("fn main() eksik", ValidationIssue::new("main missing"));
        let r = f.into_result();
        assert!(!r.is_valid);
        assert!(!r.is_complete);
        assert_eq!(r.errors.len(), 1);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(CodeValidationResult::empty_code()).unwrap();
        assert_eq!(json["isValid"], false);
        assert!(json["missingElements"].is_array());
        assert!(json["errors"][0].get("line").is_none());
    }
}
