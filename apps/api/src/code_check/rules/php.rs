use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::code_check::lexer::{line_of, SourceView};
use crate::code_check::models::{Findings, Language, ValidationIssue};
use crate::code_check::rules::LanguageRule;
use crate::util::cached_regex;

const SUPERGLOBALS: &[&str] = &[
    "$_GET",
    "$_POST",
    "$_SESSION",
    "$_COOKIE",
    "$_SERVER",
    "$_ENV",
    "$GLOBALS",
    "$_FILES",
    "$_REQUEST",
    "$this",
];

/// PHP variables must be assigned somewhere before they are read.
///
/// Definitions are an assignment (`$x = ...`, `$x .= ...`), a `foreach`
/// binding, a function or closure parameter, a `catch` binding or a
/// `global`/`static` declaration.
pub struct PhpRule;

impl LanguageRule for PhpRule {
    fn language(&self) -> Language {
        Language::Php
    }

    fn check_definitions(&self, source: &SourceView<'_>, findings: &mut Findings) {
        let code = &source.code;
        let defined = defined_variables(code);

        static VAR: OnceLock<Regex> = OnceLock::new();
        let var = cached_regex(&VAR, r"\$[A-Za-z_][A-Za-z0-9_]*");

        let mut reported = HashSet::new();
        for m in var.find_iter(code) {
            let name = m.as_str();
            if SUPERGLOBALS.contains(&name) || defined.contains(name) {
                continue;
            }
            if !reported.insert(name) {
                continue;
            }
            findings.hard(
                format!("Değişken tanımı eksik: {name}"),
                ValidationIssue::at_line(
                    line_of(code, m.start()),
                    format!("{name} değişkeni kullanılmadan önce tanımlanmalı (örn: {name} = ...;)"),
                ),
            );
        }
    }

    fn check_style(&self, source: &SourceView<'_>, findings: &mut Findings) {
        if !source.raw.contains("<?php") && !source.raw.starts_with("<?") {
            findings.suggest("PHP etiketleri (<?php ... ?>) eklenebilir");
        }
    }
}

fn defined_variables(code: &str) -> HashSet<String> {
    static ASSIGN: OnceLock<Regex> = OnceLock::new();
    static FOREACH: OnceLock<Regex> = OnceLock::new();
    static PARAMS: OnceLock<Regex> = OnceLock::new();
    static CATCH: OnceLock<Regex> = OnceLock::new();
    static DECLARE: OnceLock<Regex> = OnceLock::new();
    static VAR: OnceLock<Regex> = OnceLock::new();

    let assign = cached_regex(
        &ASSIGN,
        r"(\$[A-Za-z_][A-Za-z0-9_]*)\s*(?:\[[^\]]*\]\s*)*(?:[.+\-*/%]|\?\?)?=(?:[^=>]|$)",
    );
    let foreach = cached_regex(
        &FOREACH,
        r"\bas\s+&?(\$[A-Za-z_][A-Za-z0-9_]*)(?:\s*=>\s*&?(\$[A-Za-z_][A-Za-z0-9_]*))?",
    );
    let params = cached_regex(&PARAMS, r"\b(?:function|fn)\b[^(]*\(([^)]*)\)");
    let catch = cached_regex(&CATCH, r"\bcatch\s*\([^)$]*(\$[A-Za-z_][A-Za-z0-9_]*)");
    let declare = cached_regex(&DECLARE, r"\b(?:global|static)\s+([^;]+);");
    let var = cached_regex(&VAR, r"\$[A-Za-z_][A-Za-z0-9_]*");

    let mut defined = HashSet::new();
    for caps in assign.captures_iter(code) {
        defined.insert(caps[1].to_string());
    }
    for caps in foreach.captures_iter(code).chain(catch.captures_iter(code)) {
        for group in caps.iter().skip(1).flatten() {
            defined.insert(group.as_str().to_string());
        }
    }
    for caps in params.captures_iter(code).chain(declare.captures_iter(code)) {
        for m in var.find_iter(&caps[1]) {
            defined.insert(m.as_str().to_string());
        }
    }
    defined
}
