//! Visible-text cleanup after directive extraction.
//!
//! Consumed directive spans are cut out, filler lead-ins that only announced a
//! widget are removed, blank-line runs are collapsed and the result trimmed.

use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::info;

use crate::util::cached_regex;

/// One `{pattern, replacement}` row of the filler table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FillerPattern {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

impl FillerPattern {
    fn strip(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FillerFile {
    #[serde(default)]
    filler: Vec<FillerPattern>,
}

/// Lead-ins the tutor writes right before a quiz widget.
pub fn default_filler_patterns() -> Vec<FillerPattern> {
    [
        r"bilgini\s+test\s+edelim[!.]?",
        r"şimdi\s+mini\s+test\s+sorularına\s+geçelim[!.]?",
        r"ilk\s+mini\s+test\s+sorusuna\s+geçelim[!.:]?",
        r"ilk\s+soru\s+ile\s+başlayalım[!.:]?",
        r"mini\s+test\s+soruları[!.:]?",
        r"ikinci\s+soruya\s+bakalım[!.:]?",
        r"ve\s+üçüncü\s+sorumuz[!.:]?",
        r"cevaplarını\s+bekliyorum[!.]?",
        r"şimdi\s+birkaç\s+soru\s+çözelim[!.:]?",
        r"hadi\s+test\s+edelim[!.]?",
    ]
    .into_iter()
    .map(FillerPattern::strip)
    .collect()
}

/// Reads a `[[filler]]` table from a TOML file.
pub fn load_filler_patterns(path: &Path) -> Result<Vec<FillerPattern>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filler table '{}'", path.display()))?;
    let file: FillerFile = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse filler table '{}'", path.display()))?;
    info!(path = %path.display(), count = file.filler.len(), "Loaded filler table");
    Ok(file.filler)
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
    fillers: Vec<(Regex, String)>,
}

impl Sanitizer {
    /// Compiles the table case-insensitively; any bad pattern fails the whole table.
    pub fn new(patterns: &[FillerPattern]) -> Result<Self> {
        let fillers = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(&p.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, p.replacement.clone()))
                    .with_context(|| format!("Invalid filler pattern '{}'", p.pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fillers })
    }

    /// `spans` must be disjoint byte ranges into `text`.
    pub fn clean(&self, text: &str, spans: &[Range<usize>]) -> String {
        let mut ordered: Vec<&Range<usize>> = spans.iter().collect();
        ordered.sort_by_key(|r| r.start);

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in ordered {
            out.push_str(&text[cursor..span.start]);
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);

        for (re, replacement) in &self.fillers {
            out = re.replace_all(&out, replacement.as_str()).into_owned();
        }

        static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
        cached_regex(&BLANK_RUNS, r"\n{3,}")
            .replace_all(&out, "\n\n")
            .trim()
            .to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&default_filler_patterns()).expect("built-in filler patterns must compile")
    }
}
