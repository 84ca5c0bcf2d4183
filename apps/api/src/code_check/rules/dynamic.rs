//! JavaScript, TypeScript and Ruby: advisory checks only.

use std::sync::OnceLock;

use regex::Regex;

use crate::code_check::lexer::SourceView;
use crate::code_check::models::{Findings, Language};
use crate::code_check::rules::LanguageRule;
use crate::util::cached_regex;

pub struct JavaScriptRule;

impl LanguageRule for JavaScriptRule {
    fn language(&self) -> Language {
        Language::Javascript
    }

    fn check_definitions(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static DECL: OnceLock<Regex> = OnceLock::new();
        let decl = cached_regex(&DECL, r"\b(?:let|const|var)\s+[A-Za-z_$]");
        if !decl.is_match(&source.code) && source.raw.len() >= 50 {
            findings.mark_incomplete();
        }
    }

    fn check_style(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static OUTPUT: OnceLock<Regex> = OnceLock::new();
        let output = cached_regex(
            &OUTPUT,
            r"console\.(?:log|error|warn|info)|alert\(|document\.write\(",
        );
        if !output.is_match(&source.code) && source.raw.len() > 30 {
            findings.suggest("Çıktı için console.log() veya benzeri bir yöntem eklenebilir");
        }
    }
}

pub struct TypeScriptRule;

impl LanguageRule for TypeScriptRule {
    fn language(&self) -> Language {
        Language::Typescript
    }

    fn check_style(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static ANNOTATION: OnceLock<Regex> = OnceLock::new();
        let annotation = cached_regex(
            &ANNOTATION,
            r":\s*(?:number|string|boolean|any|unknown|void)\b",
        );
        if !annotation.is_match(&source.code) && source.raw.len() > 50 {
            findings.suggest(
                "TypeScript için tip tanımlamaları eklenebilir (örn: const a: number = 10;)",
            );
        }
    }
}

pub struct RubyRule;

impl LanguageRule for RubyRule {
    fn language(&self) -> Language {
        Language::Ruby
    }

    fn check_style(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static ASSIGN: OnceLock<Regex> = OnceLock::new();
        let assign = cached_regex(&ASSIGN, r"(?m)^\s*@{0,2}\w+\s*=[^=~]");
        if !assign.is_match(&source.code) && source.raw.len() > 50 {
            findings.suggest("Değişken tanımlamaları eklenebilir");
        }
    }
}
