//! Small helpers shared by the lesson parser and the code checker.

use std::sync::OnceLock;

use regex::Regex;

/// Compiles a built-in pattern once and returns the cached regex.
///
/// Only for patterns that are string literals in this crate; user-supplied
/// patterns go through `Regex::new` and report their errors.
pub fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in regex must compile"))
}

/// Log-safe truncation on a char boundary.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}… ({} bytes total)", &s[..idx], s.len()),
        None => s.to_string(),
    }
}

/// Expands literal `\n` escape sequences the model emits inside one-line directives.
pub fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_regex_returns_same_instance() {
        static RE: OnceLock<Regex> = OnceLock::new();
        let a = cached_regex(&RE, r"\d+");
        let b = cached_regex(&RE, r"\d+");
        assert!(std::ptr::eq(a, b));
        assert!(a.is_match("42"));
    }

    #[test]
    fn test_trunc_for_log_respects_char_boundaries() {
        assert_eq!(trunc_for_log("kısa", 10), "kısa");
        let long = "ğğğğğ";
        assert_eq!(trunc_for_log(long, 2), "ğğ… (10 bytes total)");
    }

    #[test]
    fn test_unescape_newlines() {
        assert_eq!(unescape_newlines(r"a\nb"), "a\nb");
        assert_eq!(unescape_newlines("plain"), "plain");
    }
}
