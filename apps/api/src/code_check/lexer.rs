//! Single-pass lexer that separates code from string literals and comments.
//!
//! Every byte of the input lands in exactly one token, so concatenating the
//! token texts gives back the source. Structural checks run over views built
//! from these tokens instead of over the raw text, which keeps code samples
//! embedded in strings or comments from triggering false findings.

use crate::code_check::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Code,
    Str,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// How backtick-delimited literals behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backtick {
    None,
    /// Template literal, backslash escapes apply (JavaScript, TypeScript).
    Template,
    /// Raw string, no escapes (Go).
    Raw,
}

/// Comment and string delimiters of one language.
#[derive(Debug, Clone, Copy)]
pub struct Syntax {
    line_comments: &'static [&'static str],
    block_comment: Option<(&'static str, &'static str)>,
    quotes: &'static [char],
    multiline_quotes: bool,
    triple_quotes: bool,
    backtick: Backtick,
}

impl Syntax {
    pub fn for_language(language: Language) -> Self {
        const C_STYLE: Option<(&str, &str)> = Some(("/*", "*/"));
        match language {
            Language::Php => Syntax {
                line_comments: &["//", "#"],
                block_comment: C_STYLE,
                quotes: &['"', '\''],
                multiline_quotes: true,
                triple_quotes: false,
                backtick: Backtick::None,
            },
            Language::Python => Syntax {
                line_comments: &["#"],
                block_comment: None,
                quotes: &['"', '\''],
                multiline_quotes: false,
                triple_quotes: true,
                backtick: Backtick::None,
            },
            Language::Ruby => Syntax {
                line_comments: &["#"],
                block_comment: Some(("=begin", "=end")),
                quotes: &['"', '\''],
                multiline_quotes: true,
                triple_quotes: false,
                backtick: Backtick::None,
            },
            Language::Javascript | Language::Typescript => Syntax {
                line_comments: &["//"],
                block_comment: C_STYLE,
                quotes: &['"', '\''],
                multiline_quotes: false,
                triple_quotes: false,
                backtick: Backtick::Template,
            },
            Language::Go => Syntax {
                line_comments: &["//"],
                block_comment: C_STYLE,
                quotes: &['"', '\''],
                multiline_quotes: false,
                triple_quotes: false,
                backtick: Backtick::Raw,
            },
            // `'` starts lifetimes as well as chars, so only `"` is a string.
            Language::Rust => Syntax {
                line_comments: &["//"],
                block_comment: C_STYLE,
                quotes: &['"'],
                multiline_quotes: false,
                triple_quotes: false,
                backtick: Backtick::None,
            },
            Language::Kotlin => Syntax {
                line_comments: &["//"],
                block_comment: C_STYLE,
                quotes: &['"', '\''],
                multiline_quotes: false,
                triple_quotes: true,
                backtick: Backtick::None,
            },
            Language::Java | Language::Csharp | Language::Cpp => Syntax {
                line_comments: &["//"],
                block_comment: C_STYLE,
                quotes: &['"', '\''],
                multiline_quotes: false,
                triple_quotes: false,
                backtick: Backtick::None,
            },
        }
    }

    /// Length in bytes of a comment or string starting at the head of `rest`.
    fn non_code_at(&self, rest: &str) -> Option<(TokenKind, usize)> {
        if let Some((open, close)) = self.block_comment {
            if rest.starts_with(open) {
                let body = &rest[open.len()..];
                let len = body
                    .find(close)
                    .map(|p| open.len() + p + close.len())
                    .unwrap_or(rest.len());
                return Some((TokenKind::Comment, len));
            }
        }

        if self.line_comments.iter().any(|m| rest.starts_with(m)) {
            // The newline itself stays in code so line structure survives.
            let len = rest.find('\n').unwrap_or(rest.len());
            return Some((TokenKind::Comment, len));
        }

        if self.triple_quotes {
            for delim in ["\"\"\"", "'''"] {
                if rest.starts_with(delim) {
                    let body = &rest[delim.len()..];
                    let len = body
                        .find(delim)
                        .map(|p| delim.len() + p + delim.len())
                        .unwrap_or(rest.len());
                    return Some((TokenKind::Str, len));
                }
            }
        }

        let first = rest.chars().next()?;
        if self.quotes.contains(&first) {
            return Some((
                TokenKind::Str,
                quoted_len(rest, first, true, self.multiline_quotes),
            ));
        }
        if first == '`' {
            match self.backtick {
                Backtick::Template => return Some((TokenKind::Str, quoted_len(rest, '`', true, true))),
                Backtick::Raw => return Some((TokenKind::Str, quoted_len(rest, '`', false, true))),
                Backtick::None => {}
            }
        }
        None
    }
}

/// Length of a quoted literal starting with `quote` at the head of `rest`.
///
/// Unterminated single-line literals end at the newline, which is left to
/// the following code token.
fn quoted_len(rest: &str, quote: char, escapes: bool, multiline: bool) -> usize {
    let mut chars = rest.char_indices().skip(1);
    while let Some((idx, ch)) = chars.next() {
        if escapes && ch == '\\' {
            chars.next();
            continue;
        }
        if ch == quote {
            return idx + ch.len_utf8();
        }
        if ch == '\n' && !multiline {
            return idx;
        }
    }
    rest.len()
}

/// Splits `source` into code, string and comment tokens.
pub fn lex<'a>(source: &'a str, syntax: &Syntax) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < source.len() {
        let rest = &source[i..];
        if let Some((kind, len)) = syntax.non_code_at(rest) {
            if code_start < i {
                tokens.push(Token {
                    kind: TokenKind::Code,
                    text: &source[code_start..i],
                });
            }
            tokens.push(Token {
                kind,
                text: &source[i..i + len],
            });
            i += len;
            code_start = i;
            continue;
        }
        i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
    }

    if code_start < source.len() {
        tokens.push(Token {
            kind: TokenKind::Code,
            text: &source[code_start..],
        });
    }
    tokens
}

/// The views of one submission that language rules inspect.
#[derive(Debug, Clone)]
pub struct SourceView<'a> {
    /// Submitted code, trimmed.
    pub raw: &'a str,
    /// Strings collapsed to empty literals, comments removed.
    pub code: String,
    /// Comments removed, strings kept.
    pub without_comments: String,
}

impl<'a> SourceView<'a> {
    /// Builds the views of `source`.
    ///
    /// The views are lexed from the untrimmed source, so line numbers match
    /// the submission even when it starts with blank lines.
    pub fn new(source: &'a str, language: Language) -> Self {
        let raw = source.trim();
        let tokens = lex(source, &Syntax::for_language(language));
        let mut code = String::with_capacity(source.len());
        let mut without_comments = String::with_capacity(source.len());

        for token in &tokens {
            let newlines = "\n".repeat(token.text.matches('\n').count());
            match token.kind {
                TokenKind::Code => {
                    code.push_str(token.text);
                    without_comments.push_str(token.text);
                }
                TokenKind::Str => {
                    code.push_str("\"\"");
                    code.push_str(&newlines);
                    without_comments.push_str(token.text);
                }
                TokenKind::Comment => {
                    code.push_str(&newlines);
                    without_comments.push_str(&newlines);
                }
            }
        }

        Self {
            raw,
            code,
            without_comments,
        }
    }
}

/// 1-based line number of a byte offset.
pub fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str, language: Language) -> Vec<(TokenKind, &str)> {
        lex(source, &Syntax::for_language(language))
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_lex_is_lossless() {
        let src = "<?php\n// note $a\n$b = \"x $c\"; /* $d */ echo $b; # tail";
        let tokens = lex(src, &Syntax::for_language(Language::Php));
        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, src);
    }

    #[test]
    fn test_comment_delimiter_inside_string_stays_string() {
        let toks = kinds("x = \"a // b\" // c", Language::Javascript);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Code, "x = "),
                (TokenKind::Str, "\"a // b\""),
                (TokenKind::Code, " "),
                (TokenKind::Comment, "// c"),
            ]
        );
    }

    #[test]
    fn test_quote_inside_comment_stays_comment() {
        let toks = kinds("# don't\nx = 1", Language::Python);
        assert_eq!(toks[0], (TokenKind::Comment, "# don't"));
        assert_eq!(toks[1], (TokenKind::Code, "\nx = 1"));
    }

    #[test]
    fn test_python_triple_string_spans_lines() {
        let toks = kinds("s = \"\"\"a\nb\"\"\"\nprint(s)", Language::Python);
        assert_eq!(toks[1], (TokenKind::Str, "\"\"\"a\nb\"\"\""));
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let toks = kinds(r#"$a = "say \"hi\""; $b"#, Language::Php);
        assert_eq!(toks[1], (TokenKind::Str, r#""say \"hi\"""#));
    }

    #[test]
    fn test_unterminated_string_ends_at_newline() {
        let toks = kinds("a = 'oops\nb = 2", Language::Python);
        assert_eq!(toks[1], (TokenKind::Str, "'oops"));
        assert_eq!(toks[2], (TokenKind::Code, "\nb = 2"));
    }

    #[test]
    fn test_rust_lifetimes_are_code() {
        let toks = kinds("fn f<'a>(x: &'a str) {}", Language::Rust);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].0, TokenKind::Code);
    }

    #[test]
    fn test_go_raw_string() {
        let toks = kinds("s := `a\\`", Language::Go);
        assert_eq!(toks[1], (TokenKind::Str, "`a\\`"));
    }

    #[test]
    fn test_source_view_keeps_line_numbers() {
        let view = SourceView::new("/* a\nb */\n$x = 'q\nr';\necho $y;", Language::Php);
        assert_eq!(view.code.lines().count(), view.raw.lines().count());
        assert!(!view.code.contains("q"));
        assert!(view.without_comments.contains("'q\nr'"));
        assert_eq!(line_of(&view.code, view.code.find("$y").unwrap()), 5);
    }

    #[test]
    fn test_source_view_counts_leading_blank_lines() {
        let view = SourceView::new("\n\n<?php\necho $x;\n", Language::Php);
        assert_eq!(view.raw, "<?php\necho $x;");
        assert_eq!(line_of(&view.code, view.code.find("$x").unwrap()), 4);
    }

    #[test]
    fn test_multibyte_text_is_handled() {
        let src = "# yorum: ğüşıöç\nprint(\"merhaba dünya\")";
        let view = SourceView::new(src, Language::Python);
        assert_eq!(view.code, "\nprint(\"\")");
    }
}
