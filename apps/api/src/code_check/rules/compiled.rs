//! Compiled languages: a missing entry point or import is a hard error.

use std::sync::OnceLock;

use regex::Regex;

use crate::code_check::lexer::SourceView;
use crate::code_check::models::{Findings, Language, ValidationIssue};
use crate::code_check::rules::{require, LanguageRule};
use crate::util::cached_regex;

pub struct JavaRule;

impl LanguageRule for JavaRule {
    fn language(&self) -> Language {
        Language::Java
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static CLASS: OnceLock<Regex> = OnceLock::new();
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            &source.code,
            cached_regex(&CLASS, r"\bclass\s+\w+"),
            "class Main yapısı eksik",
            "Java kodu class Main { ... } yapısında olmalı",
        );
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"public\s+static\s+void\s+main\s*\("),
            "public static void main(String[] args) metodu eksik",
            "Java kodu main metodu içermeli: public static void main(String[] args) { ... }",
        );
    }
}

pub struct CSharpRule;

impl LanguageRule for CSharpRule {
    fn language(&self) -> Language {
        Language::Csharp
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static CLASS: OnceLock<Regex> = OnceLock::new();
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            &source.code,
            cached_regex(&CLASS, r"\bclass\s+\w+"),
            "class yapısı eksik",
            "C# kodu class Program { ... } yapısında olmalı",
        );
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"static\s+(?:async\s+)?(?:void|int|Task)\s+Main\s*\("),
            "static void Main(string[] args) metodu eksik",
            "C# kodu Main metodu içermeli: static void Main(string[] args) { ... }",
        );
    }

    fn check_style(&self, source: &SourceView<'_>, findings: &mut Findings) {
        if source.code.contains("Console.WriteLine") && !source.code.contains("using System") {
            findings.suggest("using System; eklenebilir");
        }
    }
}

pub struct GoRule;

impl LanguageRule for GoRule {
    fn language(&self) -> Language {
        Language::Go
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static PACKAGE: OnceLock<Regex> = OnceLock::new();
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            source.code.trim_start(),
            cached_regex(&PACKAGE, r"\Apackage\s+main\b"),
            "package main eksik",
            "Go kodu 'package main' ile başlamalı",
        );
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"func\s+main\s*\("),
            "func main() fonksiyonu eksik",
            "Go kodu func main() { ... } fonksiyonu içermeli",
        );
    }

    fn check_imports(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static USES_FMT: OnceLock<Regex> = OnceLock::new();
        static SINGLE: OnceLock<Regex> = OnceLock::new();
        static GROUP: OnceLock<Regex> = OnceLock::new();

        if !cached_regex(&USES_FMT, r"\bfmt\.").is_match(&source.code) {
            return;
        }
        let text = &source.without_comments;
        let single = cached_regex(&SINGLE, r#"\bimport\s+"fmt""#).is_match(text);
        let grouped = cached_regex(&GROUP, r"\bimport\s*\(([^)]*)\)")
            .captures_iter(text)
            .any(|caps| caps[1].contains("\"fmt\""));
        if !single && !grouped {
            findings.hard(
                "import \"fmt\" eksik",
                ValidationIssue::new("fmt paketi kullanılıyorsa import \"fmt\" eklenmeli"),
            );
        }
    }
}

pub struct RustRule;

impl LanguageRule for RustRule {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"\bfn\s+main\s*\("),
            "fn main() fonksiyonu eksik",
            "Rust kodu fn main() { ... } fonksiyonu içermeli",
        );
    }
}

pub struct CppRule;

impl LanguageRule for CppRule {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"\bint\s+main\s*\("),
            "int main() fonksiyonu eksik",
            "C++ kodu int main() { ... } fonksiyonu içermeli",
        );
    }

    fn check_imports(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static COUT: OnceLock<Regex> = OnceLock::new();
        static INCLUDE: OnceLock<Regex> = OnceLock::new();
        if !cached_regex(&COUT, r"\bcout\b").is_match(&source.code) {
            return;
        }
        require(
            findings,
            &source.without_comments,
            cached_regex(&INCLUDE, r"#\s*include\s*<iostream>"),
            "#include <iostream> eksik",
            "cout kullanılıyorsa #include <iostream> eklenmeli",
        );
    }
}

pub struct KotlinRule;

impl LanguageRule for KotlinRule {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn check_entry_point(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static MAIN: OnceLock<Regex> = OnceLock::new();
        require(
            findings,
            &source.code,
            cached_regex(&MAIN, r"\bfun\s+main\s*\("),
            "fun main() fonksiyonu eksik",
            "Kotlin kodu fun main() { ... } fonksiyonu içermeli",
        );
    }
}
