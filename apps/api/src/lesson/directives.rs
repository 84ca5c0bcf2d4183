//! Per-directive parsers.
//!
//! A directive is located in two steps: [`find_next`] finds the next
//! `[NAME:` (or `[NAME]`) head, then [`DirectiveHead::locate`] finds where it
//! ends. Payloads that may carry their own brackets (code, question text) are
//! closed by depth counting; the rest end at the first `]`. The payload is then
//! handed to [`parse_payload`], which either produces a [`Directive`] or says
//! why the occurrence was rejected.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::code_check::models::Language;
use crate::lesson::mini_test::{MiniTestCandidate, MiniTestValidation, MiniTestValidator};
use crate::lesson::models::{
    Action, BugfixTask, ChoicesData, CodeBlockData, FillBlankData, LiveCodingTask, Question,
    QuestionData, QuestionType, TaskData, TimedBugfixData,
};
use crate::lesson::scanner::find_closing_bracket;
use crate::lesson::segmenter::{peel_known, peel_trailing, split_list};
use crate::util::{cached_regex, unescape_newlines};

const CODE_BLOCK_FLAGS: &[&str] = &["true", "false", "editable", "runnable"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveKind {
    Roadmap,
    CurrentStep,
    StepComplete,
    LessonComplete,
    CodeBlock,
    TestQuestion,
    MiniTest,
    FillBlank,
    TimedBugfix,
    Choices,
    Image,
    CreateLivecoding,
    CreateBugfix,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 13] = [
        DirectiveKind::Roadmap,
        DirectiveKind::CurrentStep,
        DirectiveKind::StepComplete,
        DirectiveKind::LessonComplete,
        DirectiveKind::CodeBlock,
        DirectiveKind::TestQuestion,
        DirectiveKind::MiniTest,
        DirectiveKind::FillBlank,
        DirectiveKind::TimedBugfix,
        DirectiveKind::Choices,
        DirectiveKind::Image,
        DirectiveKind::CreateLivecoding,
        DirectiveKind::CreateBugfix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Roadmap => "ROADMAP",
            DirectiveKind::CurrentStep => "CURRENT_STEP",
            DirectiveKind::StepComplete => "STEP_COMPLETE",
            DirectiveKind::LessonComplete => "LESSON_COMPLETE",
            DirectiveKind::CodeBlock => "CODE_BLOCK",
            DirectiveKind::TestQuestion => "TEST_QUESTION",
            DirectiveKind::MiniTest => "MINI_TEST",
            DirectiveKind::FillBlank => "FILL_BLANK",
            DirectiveKind::TimedBugfix => "TIMED_BUGFIX",
            DirectiveKind::Choices => "CHOICES",
            DirectiveKind::Image => "IMAGE",
            DirectiveKind::CreateLivecoding => "CREATE_LIVECODING",
            DirectiveKind::CreateBugfix => "CREATE_BUGFIX",
        }
    }

    /// Case-insensitive lookup by directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Whether the payload may contain balanced brackets of its own.
    fn nests(self) -> bool {
        !matches!(
            self,
            DirectiveKind::Roadmap
                | DirectiveKind::CurrentStep
                | DirectiveKind::StepComplete
                | DirectiveKind::LessonComplete
                | DirectiveKind::Choices
                | DirectiveKind::Image
        )
    }
}

/// Why one directive occurrence was not turned into output.
#[derive(Debug, Clone, Error)]
pub enum DirectiveError {
    #[error("no matching closing bracket")]
    Unclosed,

    #[error("missing language before the first comma")]
    MissingLanguage,

    #[error("expected {expected} comma-separated parts, found {found}")]
    InsufficientParts { found: usize, expected: usize },

    #[error("correct index {0} is outside 0..=3")]
    IndexOutOfRange(i64),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("language '{0}' is not supported")]
    UnsupportedLanguage(String),

    #[error("{0} is empty")]
    EmptyField(&'static str),

    #[error("unexpected arguments '{0}'")]
    UnexpectedPayload(String),

    #[error("question failed validation ({} error(s))", .0.errors.len())]
    FailedValidation(MiniTestValidation),
}

/// A successfully parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Roadmap(String),
    CurrentStep(u32),
    StepComplete(u32),
    LessonComplete,
    Image(String),
    Action(Action),
}

/// The `[NAME:` or `[NAME]` opening of a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveHead {
    pub kind: DirectiveKind,
    /// Offset of the opening `[`.
    pub start: usize,
    /// Offset just past the `:` or `]` that follows the name.
    pub end: usize,
    /// The head was `[NAME]`, so there is no payload.
    pub bare: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    /// Whole directive including both brackets.
    pub span: Range<usize>,
    pub payload: &'a str,
}

/// Finds the next directive head at or after `from`.
pub fn find_next(text: &str, from: usize) -> Option<DirectiveHead> {
    static HEAD: OnceLock<Regex> = OnceLock::new();
    let head = cached_regex(
        &HEAD,
        r"(?i)\[(ROADMAP|CURRENT_STEP|STEP_COMPLETE|LESSON_COMPLETE|CODE_BLOCK|TEST_QUESTION|MINI_TEST|FILL_BLANK|TIMED_BUGFIX|CHOICES|IMAGE|CREATE_LIVECODING|CREATE_BUGFIX)\s*([:\]])",
    );

    if from > text.len() {
        return None;
    }
    let caps = head.captures_at(text, from)?;
    let whole = caps.get(0)?;
    Some(DirectiveHead {
        kind: DirectiveKind::from_name(&caps[1])?,
        start: whole.start(),
        end: whole.end(),
        bare: &caps[2] == "]",
    })
}

impl DirectiveHead {
    pub fn locate<'a>(&self, text: &'a str) -> Result<Located<'a>, DirectiveError> {
        if self.bare {
            return Ok(Located {
                span: self.start..self.end,
                payload: "",
            });
        }

        let close = if self.kind.nests() {
            find_closing_bracket(text, self.end)
        } else {
            // A flat payload cannot contain `[`; one opening first means the
            // `]` found later belongs to another directive.
            text[self.end..]
                .find(['[', ']'])
                .filter(|&i| text.as_bytes()[self.end + i] == b']')
                .map(|i| self.end + i)
        }
        .ok_or(DirectiveError::Unclosed)?;

        Ok(Located {
            span: self.start..close + 1,
            payload: &text[self.end..close],
        })
    }
}

pub fn parse_payload(
    kind: DirectiveKind,
    payload: &str,
    mini_tests: &dyn MiniTestValidator,
) -> Result<Directive, DirectiveError> {
    match kind {
        DirectiveKind::Roadmap => non_empty(payload, "roadmap").map(Directive::Roadmap),
        DirectiveKind::CurrentStep => parse_step(payload).map(Directive::CurrentStep),
        DirectiveKind::StepComplete => parse_step(payload).map(Directive::StepComplete),
        DirectiveKind::LessonComplete => {
            let rest = payload.trim();
            if rest.is_empty() {
                Ok(Directive::LessonComplete)
            } else {
                Err(DirectiveError::UnexpectedPayload(rest.to_string()))
            }
        }
        DirectiveKind::Image => non_empty(payload, "image query").map(Directive::Image),
        DirectiveKind::Choices => parse_choices(payload).map(Directive::Action),
        DirectiveKind::CodeBlock => parse_code_block(payload).map(Directive::Action),
        DirectiveKind::TestQuestion => parse_test_question(payload)
            .map(|question| Directive::Action(Action::TestQuestion(QuestionData { question }))),
        DirectiveKind::MiniTest => parse_mini_test(payload, mini_tests)
            .map(|question| Directive::Action(Action::MiniTest(QuestionData { question }))),
        DirectiveKind::FillBlank => parse_fill_blank(payload).map(Directive::Action),
        DirectiveKind::TimedBugfix => parse_timed_bugfix(payload).map(Directive::Action),
        DirectiveKind::CreateLivecoding => parse_create_livecoding(payload).map(Directive::Action),
        DirectiveKind::CreateBugfix => parse_create_bugfix(payload).map(Directive::Action),
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, DirectiveError> {
    let value = value.trim();
    if value.is_empty() {
        Err(DirectiveError::EmptyField(field))
    } else {
        Ok(value.to_string())
    }
}

fn parse_step(payload: &str) -> Result<u32, DirectiveError> {
    let raw = payload.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DirectiveError::InvalidNumber(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| DirectiveError::InvalidNumber(raw.to_string()))
}

fn parse_choices(payload: &str) -> Result<Action, DirectiveError> {
    let choices = split_list(payload);
    if choices.is_empty() {
        return Err(DirectiveError::EmptyField("choices"));
    }
    Ok(Action::Choices(ChoicesData { choices }))
}

/// `[CODE_BLOCK: language, code(, editable)(, runnable)]`
///
/// With a single trailing flag, the flag is `runnable`.
fn parse_code_block(payload: &str) -> Result<Action, DirectiveError> {
    let (language, rest) = payload
        .split_once(',')
        .ok_or(DirectiveError::MissingLanguage)?;
    let language = language.trim();
    if language.is_empty() {
        return Err(DirectiveError::MissingLanguage);
    }

    let segments = peel_known(rest, 2, CODE_BLOCK_FLAGS);
    let (editable, runnable) = match segments.params.as_slice() {
        [editable, runnable] => (flag(editable, "editable"), flag(runnable, "runnable")),
        [runnable] => (false, flag(runnable, "runnable")),
        _ => (false, false),
    };

    let code = unescape_newlines(strip_matching_quotes(segments.content));
    if code.trim().is_empty() {
        return Err(DirectiveError::EmptyField("code"));
    }

    Ok(Action::CodeBlock(CodeBlockData {
        language: language.to_string(),
        code,
        editable,
        runnable,
        readonly: !editable,
    }))
}

fn flag(token: &str, name: &str) -> bool {
    token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case(name)
}

fn strip_matching_quotes(code: &str) -> &str {
    for quote in ['"', '\''] {
        if code.len() >= 2 && code.starts_with(quote) && code.ends_with(quote) {
            return &code[1..code.len() - 1];
        }
    }
    code
}

/// Question text, four options and an index, peeled from the end so the
/// question itself may contain commas.
fn split_question(payload: &str) -> Result<MiniTestCandidate, DirectiveError> {
    let segments = peel_trailing(payload, 5, |_| true);
    if segments.params.len() < 5 {
        return Err(DirectiveError::InsufficientParts {
            found: segments.params.len() + 1,
            expected: 6,
        });
    }

    let raw_index = segments.params[4];
    let correct_index = raw_index
        .parse::<i64>()
        .map_err(|_| DirectiveError::InvalidNumber(raw_index.to_string()))?;

    Ok(MiniTestCandidate {
        text: segments.content.to_string(),
        options: segments.params[..4]
            .iter()
            .map(|option| normalize_option(option))
            .collect(),
        correct_index,
    })
}

/// Drops a leading `A)`-style letter label.
fn normalize_option(option: &str) -> String {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    cached_regex(&LABEL, r"(?i)^[a-d]\)\s*")
        .replace(option.trim(), "")
        .trim()
        .to_string()
}

fn parse_test_question(payload: &str) -> Result<Question, DirectiveError> {
    let candidate = split_question(payload)?;
    if !(0..4).contains(&candidate.correct_index) {
        return Err(DirectiveError::IndexOutOfRange(candidate.correct_index));
    }
    let text = non_empty(&candidate.text, "question")?;
    if candidate.options.iter().any(|o| o.is_empty()) {
        return Err(DirectiveError::EmptyField("option"));
    }

    let [a, b, c, d]: [String; 4] = candidate
        .options
        .try_into()
        .map_err(|_| DirectiveError::EmptyField("option"))?;
    Ok(Question {
        text,
        kind: QuestionType::MultipleChoice,
        options: [a, b, c, d],
        correct_index: candidate.correct_index as u8,
    })
}

/// Like TEST_QUESTION, but the question must also pass the mini-test validator.
fn parse_mini_test(
    payload: &str,
    validator: &dyn MiniTestValidator,
) -> Result<Question, DirectiveError> {
    let candidate = split_question(payload)?;
    let validation = validator.validate(&candidate);
    match validation.data {
        Some(question) if validation.is_valid => Ok(question),
        _ => Err(DirectiveError::FailedValidation(validation)),
    }
}

/// `[FILL_BLANK: code, blank1, blank2, ...]`
fn parse_fill_blank(payload: &str) -> Result<Action, DirectiveError> {
    let (code, blanks) = payload
        .split_once(',')
        .ok_or(DirectiveError::InsufficientParts {
            found: 1,
            expected: 2,
        })?;
    let code = unescape_newlines(&non_empty(code, "code")?);
    let blanks = split_list(blanks);
    if blanks.is_empty() {
        return Err(DirectiveError::EmptyField("blanks"));
    }
    Ok(Action::FillBlank(FillBlankData { code, blanks }))
}

/// `[TIMED_BUGFIX: code, seconds]`
fn parse_timed_bugfix(payload: &str) -> Result<Action, DirectiveError> {
    let (code, seconds) = payload
        .rsplit_once(',')
        .ok_or(DirectiveError::InsufficientParts {
            found: 1,
            expected: 2,
        })?;
    let seconds = seconds.trim();
    let time_seconds = match seconds.parse::<u32>() {
        Ok(n) if n > 0 && !seconds.starts_with('+') => n,
        _ => return Err(DirectiveError::InvalidNumber(seconds.to_string())),
    };
    let code = unescape_newlines(&non_empty(code, "code")?);
    Ok(Action::TimedBugfix(TimedBugfixData { code, time_seconds }))
}

fn live_coding_language(token: &str) -> Result<Language, DirectiveError> {
    let token = token.trim();
    token
        .parse::<Language>()
        .ok()
        .filter(Language::supports_live_coding)
        .ok_or_else(|| DirectiveError::UnsupportedLanguage(token.to_string()))
}

fn comma_parts(payload: &str) -> usize {
    payload.split(',').count()
}

/// `[CREATE_LIVECODING: title, description, language]`
fn parse_create_livecoding(payload: &str) -> Result<Action, DirectiveError> {
    let insufficient = || DirectiveError::InsufficientParts {
        found: comma_parts(payload),
        expected: 3,
    };
    let (title, rest) = payload.split_once(',').ok_or_else(insufficient)?;
    let (description, language) = rest.rsplit_once(',').ok_or_else(insufficient)?;

    let language = live_coding_language(language)?;
    Ok(Action::CreateLivecoding(TaskData {
        task: LiveCodingTask {
            title: non_empty(title, "title")?,
            description: non_empty(description, "description")?,
            languages: vec![language],
            acceptance_criteria: Vec::new(),
        },
    }))
}

/// `[CREATE_BUGFIX: title, buggy code, fix description, language]`
fn parse_create_bugfix(payload: &str) -> Result<Action, DirectiveError> {
    let insufficient = || DirectiveError::InsufficientParts {
        found: comma_parts(payload),
        expected: 4,
    };
    let (title, rest) = payload.split_once(',').ok_or_else(insufficient)?;
    let (rest, language) = rest.rsplit_once(',').ok_or_else(insufficient)?;
    let (buggy_code, fix_description) = rest.rsplit_once(',').ok_or_else(insufficient)?;

    let language = live_coding_language(language)?;
    Ok(Action::CreateBugfix(TaskData {
        task: BugfixTask {
            title: non_empty(title, "title")?,
            buggy_code: non_empty(&strip_fences(buggy_code), "buggy code")?,
            fix_description: non_empty(fix_description, "fix description")?,
            language,
        },
    }))
}

/// Unwraps markdown code fences, keeping only the fenced code.
fn strip_fences(code: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&FENCE, r"(?s)```\w*\n?(.*?)```")
        .replace_all(code, "$1")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::mini_test::StrictMiniTestValidator;
    use crate::lesson::models::LiveCodingLanguage;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(text: &str) -> Result<Directive, DirectiveError> {
        let head = find_next(text, 0).expect("directive head");
        let located = head.locate(text)?;
        parse_payload(head.kind, located.payload, &StrictMiniTestValidator)
    }

    fn action(text: &str) -> Action {
        match parse(text) {
            Ok(Directive::Action(action)) => action,
            other => panic!("expected action, got {other:?}"),
        }
    }

    #[test]
    fn test_find_next_is_case_insensitive_and_skips_plain_brackets() {
        let text = "bak [not this] ve [code_block: py, x]";
        let head = find_next(text, 0).unwrap();
        assert_eq!(head.kind, DirectiveKind::CodeBlock);
        assert_eq!(head.start, 18);
        assert!(!head.bare);
    }

    #[test]
    fn test_find_next_respects_from() {
        let text = "[IMAGE: a] [IMAGE: b]";
        let head = find_next(text, 1).unwrap();
        assert_eq!(head.start, 11);
        assert!(find_next(text, 12).is_none());
    }

    #[test]
    fn test_locate_nested_payload() {
        let text = "[CODE_BLOCK: python, def f(a): return a[0], true, true] sonra";
        let head = find_next(text, 0).unwrap();
        let located = head.locate(text).unwrap();
        assert_eq!(&text[located.span.clone()], "[CODE_BLOCK: python, def f(a): return a[0], true, true]");
        assert_eq!(located.payload, " python, def f(a): return a[0], true, true");
    }

    #[test]
    fn test_locate_unclosed_fails() {
        let text = "[MINI_TEST: Soru, a, b, c, d, 0";
        let head = find_next(text, 0).unwrap();
        assert!(matches!(head.locate(text), Err(DirectiveError::Unclosed)));
    }

    #[test]
    fn test_flat_directive_ends_at_first_bracket() {
        let text = "[ROADMAP: 1. Giriş 2. Döngüler] [x]";
        match parse(text).unwrap() {
            Directive::Roadmap(r) => assert_eq!(r, "1. Giriş 2. Döngüler"),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn test_flat_directive_does_not_borrow_later_bracket() {
        let text = "[IMAGE: döngü diyagramı\n[CODE_BLOCK: python, print(1)]";
        let head = find_next(text, 0).unwrap();
        assert!(matches!(head.locate(text), Err(DirectiveError::Unclosed)));
    }

    #[rstest]
    #[case("[CURRENT_STEP: 3]", Some(Directive::CurrentStep(3)))]
    #[case("[STEP_COMPLETE:2 ]", Some(Directive::StepComplete(2)))]
    #[case("[LESSON_COMPLETE]", Some(Directive::LessonComplete))]
    #[case("[lesson_complete]", Some(Directive::LessonComplete))]
    #[case("[CURRENT_STEP: iki]", None)]
    #[case("[CURRENT_STEP: -1]", None)]
    #[case("[IMAGE:   ]", None)]
    fn test_signal_directives(#[case] text: &str, #[case] expected: Option<Directive>) {
        assert_eq!(parse(text).ok(), expected);
    }

    #[test]
    fn test_code_block_keeps_inner_brackets() {
        let Action::CodeBlock(block) = action("[CODE_BLOCK: python, def f(a): return a[0], true, true]") else {
            panic!("not a code block");
        };
        assert_eq!(block.code, "def f(a): return a[0]");
        assert!(block.editable);
        assert!(block.runnable);
        assert!(!block.readonly);
    }

    #[rstest]
    #[case("[CODE_BLOCK: js, x(), false, true]", false, true)]
    #[case("[CODE_BLOCK: js, x(), editable, runnable]", true, true)]
    #[case("[CODE_BLOCK: js, x(), TRUE, false]", true, false)]
    #[case("[CODE_BLOCK: js, x(), runnable]", false, true)]
    #[case("[CODE_BLOCK: js, x()]", false, false)]
    fn test_code_block_flags(#[case] text: &str, #[case] editable: bool, #[case] runnable: bool) {
        let Action::CodeBlock(block) = action(text) else {
            panic!("not a code block");
        };
        assert_eq!(block.code, "x()");
        assert_eq!((block.editable, block.runnable), (editable, runnable));
        assert_eq!(block.readonly, !editable);
    }

    #[test]
    fn test_code_block_unescapes_and_strips_quotes() {
        let Action::CodeBlock(block) = action(r#"[CODE_BLOCK: python, "x = 1\nprint(x)", true, false]"#) else {
            panic!("not a code block");
        };
        assert_eq!(block.code, "x = 1\nprint(x)");
    }

    #[test]
    fn test_code_block_keeps_unbalanced_quote() {
        let Action::CodeBlock(block) = action("[CODE_BLOCK: python, x = 'a', false]") else {
            panic!("not a code block");
        };
        assert_eq!(block.code, "x = 'a'");
    }

    #[test]
    fn test_code_block_requires_language() {
        assert!(matches!(
            parse("[CODE_BLOCK: print(1)]"),
            Err(DirectiveError::MissingLanguage)
        ));
        assert!(matches!(
            parse("[CODE_BLOCK: python, ]"),
            Err(DirectiveError::EmptyField("code"))
        ));
    }

    #[test]
    fn test_test_question_with_commas_in_text() {
        let Action::TestQuestion(QuestionData { question }) =
            action("[TEST_QUESTION: f(a, b) ne döndürür?, A) 1, B) 2, C) 3, D) 4, 1]")
        else {
            panic!("not a test question");
        };
        assert_eq!(question.text, "f(a, b) ne döndürür?");
        assert_eq!(question.options, ["1", "2", "3", "4"].map(String::from));
        assert_eq!(question.correct_index, 1);
    }

    #[rstest]
    #[case("[TEST_QUESTION: Soru, A, B, C, D, 4]")]
    #[case("[TEST_QUESTION: Soru, A, B, C, D, -1]")]
    fn test_test_question_index_out_of_range(#[case] text: &str) {
        assert!(matches!(parse(text), Err(DirectiveError::IndexOutOfRange(_))));
    }

    #[test]
    fn test_question_needs_six_parts() {
        match parse("[MINI_TEST: Soru, A, B, C, 1]") {
            Err(DirectiveError::InsufficientParts { found, expected }) => {
                assert_eq!((found, expected), (5, 6));
            }
            other => panic!("{other:?}"),
        }
        assert!(matches!(
            parse("[MINI_TEST: Soru, A, B, C, D, bir]"),
            Err(DirectiveError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_mini_test_goes_through_validator() {
        match parse("[MINI_TEST: Soru, A, B, C, D, 7]") {
            Err(DirectiveError::FailedValidation(v)) => assert!(!v.is_valid),
            other => panic!("{other:?}"),
        }
        let Action::MiniTest(QuestionData { question }) =
            action("[MINI_TEST: Liste nasıl tanımlanır?, x = [], x = {}, x = (), x = <>, 0]")
        else {
            panic!("not a mini test");
        };
        assert_eq!(question.options[0], "x = []");
    }

    #[test]
    fn test_fill_blank() {
        let Action::FillBlank(data) = action(r"[FILL_BLANK: for i in ___(3):\n  print(i), range, ]") else {
            panic!("not a fill blank");
        };
        assert_eq!(data.code, "for i in ___(3):\n  print(i)");
        assert_eq!(data.blanks, vec!["range"]);
        assert!(matches!(
            parse("[FILL_BLANK: x = ___, ]"),
            Err(DirectiveError::EmptyField("blanks"))
        ));
    }

    #[rstest]
    #[case("[TIMED_BUGFIX: print(x[0]), 60]", Some(60))]
    #[case("[TIMED_BUGFIX: f(a, b), 90]", Some(90))]
    #[case("[TIMED_BUGFIX: f(a), 0]", None)]
    #[case("[TIMED_BUGFIX: f(a), otuz]", None)]
    #[case("[TIMED_BUGFIX: f(a)]", None)]
    fn test_timed_bugfix(#[case] text: &str, #[case] seconds: Option<u32>) {
        let got = match parse(text) {
            Ok(Directive::Action(Action::TimedBugfix(d))) => Some(d.time_seconds),
            _ => None,
        };
        assert_eq!(got, seconds);
    }

    #[test]
    fn test_choices_drop_empty_entries() {
        let Action::Choices(data) = action("[CHOICES: Evet, , Hayır ,]") else {
            panic!("not choices");
        };
        assert_eq!(data.choices, vec!["Evet", "Hayır"]);
        assert!(matches!(
            parse("[CHOICES: , ,]"),
            Err(DirectiveError::EmptyField("choices"))
        ));
    }

    #[test]
    fn test_create_livecoding() {
        let Action::CreateLivecoding(TaskData { task }) =
            action("[CREATE_LIVECODING: Toplama, İki sayıyı, toplayan fonksiyon yaz, Python]")
        else {
            panic!("not livecoding");
        };
        assert_eq!(task.title, "Toplama");
        assert_eq!(task.description, "İki sayıyı, toplayan fonksiyon yaz");
        assert_eq!(task.languages, vec![LiveCodingLanguage::Python]);
        assert!(task.acceptance_criteria.is_empty());
    }

    #[test]
    fn test_create_livecoding_rejects_unsupported_language() {
        assert!(matches!(
            parse("[CREATE_LIVECODING: Başlık, Açıklama, rust]"),
            Err(DirectiveError::UnsupportedLanguage(l)) if l == "rust"
        ));
    }

    #[test]
    fn test_create_bugfix_strips_fences() {
        let text = "[CREATE_BUGFIX: Hata, ```python\nprint(x[0]\n```, Parantezi kapat, python]";
        let Action::CreateBugfix(TaskData { task }) = action(text) else {
            panic!("not bugfix");
        };
        assert_eq!(task.buggy_code, "print(x[0]");
        assert_eq!(task.fix_description, "Parantezi kapat");
        assert_eq!(task.language, LiveCodingLanguage::Python);
    }

    #[test]
    fn test_create_bugfix_needs_four_parts() {
        assert!(matches!(
            parse("[CREATE_BUGFIX: Hata, kod, java]"),
            Err(DirectiveError::InsufficientParts { expected: 4, .. })
        ));
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in DirectiveKind::ALL {
            assert_eq!(DirectiveKind::from_name(&kind.name().to_lowercase()), Some(kind));
        }
    }
}
