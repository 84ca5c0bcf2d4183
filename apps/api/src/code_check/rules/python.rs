use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::code_check::lexer::SourceView;
use crate::code_check::models::{Findings, Language};
use crate::code_check::rules::LanguageRule;
use crate::util::cached_regex;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "true",
    "false", "none", "self",
];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "bytearray", "bytes", "chr", "classmethod",
    "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate", "eval", "exec",
    "filter", "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help",
    "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len", "list", "locals",
    "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord", "pow", "print",
    "property", "range", "repr", "reversed", "round", "set", "setattr", "slice", "sorted",
    "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip", "exception",
    "valueerror", "typeerror", "keyerror", "indexerror",
];

/// Python is dynamic: names that look undefined only produce suggestions.
///
/// Lines are read top to bottom. Names become known when they are
/// assigned, imported, bound by `def`/`class`/`for`/`as`, or appear as
/// parameters. Names read on a line that does none of that, and that are
/// not yet known, get an "ensure it is defined" hint.
pub struct PythonRule;

impl LanguageRule for PythonRule {
    fn language(&self) -> Language {
        Language::Python
    }

    fn check_definitions(&self, source: &SourceView<'_>, findings: &mut Findings) {
        static IMPORT: OnceLock<Regex> = OnceLock::new();
        static FROM_IMPORT: OnceLock<Regex> = OnceLock::new();
        static ASSIGN: OnceLock<Regex> = OnceLock::new();
        static BINDER: OnceLock<Regex> = OnceLock::new();
        static IDENT: OnceLock<Regex> = OnceLock::new();

        let import = cached_regex(&IMPORT, r"^\s*import\s+(.+)$");
        let from_import = cached_regex(&FROM_IMPORT, r"^\s*from\s+[\w.]+\s+import\s+(.+)$");
        let assign = cached_regex(&ASSIGN, r"^\s*([A-Za-z_][\w,\s]*?)\s*(?:[+\-*/%]|//)?=[^=]");
        let binder = cached_regex(
            &BINDER,
            r"\bdef\s+([A-Za-z_]\w*)\s*\(([^)]*)\)|\bfor\s+([\w,\s]+?)\s+in\b|\b(?:def|class|as|with)\s+([A-Za-z_]\w*)",
        );
        let ident = cached_regex(&IDENT, r"[A-Za-z_]\w*");

        let mut known: HashSet<String> = HashSet::new();

        for line in source.code.lines() {
            let mut binds = false;

            if let Some(caps) = from_import.captures(line).or_else(|| import.captures(line)) {
                for name in caps[1].split(',') {
                    let name = name.split(" as ").last().unwrap_or(name).trim();
                    let root = name.split('.').next().unwrap_or(name);
                    if !root.is_empty() {
                        known.insert(root.to_string());
                    }
                }
                continue;
            }

            if let Some(caps) = assign.captures(line) {
                for target in ident.find_iter(&caps[1]) {
                    known.insert(target.as_str().to_string());
                }
                binds = true;
            }

            for caps in binder.captures_iter(line) {
                for group in caps.iter().skip(1).flatten() {
                    for name in ident.find_iter(group.as_str()) {
                        known.insert(name.as_str().to_string());
                    }
                }
                binds = true;
            }

            if binds || line.contains('=') {
                continue;
            }

            for m in ident.find_iter(line) {
                let name = m.as_str();
                let lower = name.to_lowercase();
                let is_attribute = line[..m.start()].ends_with('.');
                if is_attribute
                    || KEYWORDS.contains(&lower.as_str())
                    || BUILTINS.contains(&lower.as_str())
                    || known.contains(name)
                {
                    continue;
                }
                findings.suggest(format!("{name} değişkeninin tanımlı olduğundan emin olun"));
            }
        }
    }
}
