//! Backward parameter peeling.
//!
//! Free-form payloads (code, question text) contain commas, so parameters are
//! taken from the end: the text after the last comma is a parameter only if
//! the directive accepts it, and peeling stops at the first token that is not
//! accepted. Whatever remains is content.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Payload left after peeling, trimmed.
    pub content: &'a str,
    /// Peeled parameters in textual order, each trimmed.
    pub params: Vec<&'a str>,
}

/// Peels at most `max` trailing comma-separated tokens accepted by `accept`.
pub fn peel_trailing<'a, F>(payload: &'a str, max: usize, accept: F) -> Segments<'a>
where
    F: Fn(&str) -> bool,
{
    let mut content = payload.trim();
    let mut params = Vec::new();

    while params.len() < max {
        let Some(comma) = content.rfind(',') else {
            break;
        };
        let token = content[comma + 1..].trim();
        if !accept(token) {
            break;
        }
        params.push(token);
        content = content[..comma].trim_end();
    }

    params.reverse();
    Segments { content, params }
}

/// Peels tokens from a fixed, case-insensitive allow-list.
pub fn peel_known<'a>(payload: &'a str, max: usize, valid: &[&str]) -> Segments<'a> {
    peel_trailing(payload, max, |token| {
        valid.iter().any(|v| v.eq_ignore_ascii_case(token))
    })
}

/// Splits on every comma, trimming and dropping empty parts.
pub fn split_list(payload: &str) -> Vec<String> {
    payload
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAGS: &[&str] = &["true", "false", "editable", "runnable"];

    #[test]
    fn test_peels_two_flags_and_keeps_commas_in_code() {
        let s = peel_known("def topla(a, b): return a + b, true, false", 2, FLAGS);
        assert_eq!(s.content, "def topla(a, b): return a + b");
        assert_eq!(s.params, vec!["true", "false"]);
    }

    #[test]
    fn test_stops_at_first_unknown_token() {
        let s = peel_known("f(a, b), TRUE", 2, FLAGS);
        assert_eq!(s.content, "f(a, b)");
        assert_eq!(s.params, vec!["TRUE"]);
    }

    #[test]
    fn test_respects_max() {
        let s = peel_known("x, true, true, true", 2, FLAGS);
        assert_eq!(s.content, "x, true");
        assert_eq!(s.params.len(), 2);
    }

    #[test]
    fn test_no_comma_means_all_content() {
        let s = peel_known("  print(1)  ", 2, FLAGS);
        assert_eq!(s.content, "print(1)");
        assert!(s.params.is_empty());
    }

    #[test]
    fn test_code_ending_in_flag_word_is_ambiguous() {
        // The format has no escaping: a trailing `true` is read as a flag.
        let s = peel_known("return x, true", 2, FLAGS);
        assert_eq!(s.content, "return x");
        assert_eq!(s.params, vec!["true"]);
    }

    #[test]
    fn test_peel_with_predicate_for_question() {
        let s = peel_trailing("Soru, a, b?, A) x, B) y, C) z, D) w, 2", 5, |t| !t.is_empty());
        assert_eq!(s.content, "Soru, a, b?");
        assert_eq!(s.params, vec!["A) x", "B) y", "C) z", "D) w", "2"]);
    }

    #[test]
    fn test_split_list_drops_empty() {
        assert_eq!(split_list(" a, ,b ,, c"), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }
}
