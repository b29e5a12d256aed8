//! matcher.rs - Builds boundary-aware match specifications for single terms.
//!
//! A term is matched as a literal, case-insensitively, and only where it stands
//! on its own. The candidate search is delegated to an escaped, case-insensitive
//! `Regex`. Each candidate is then accepted only if it lowercases to the term
//! (the regex folds more widely than `str::to_lowercase`, e.g. `ſ` against `s`)
//! and if the characters just outside it are not word characters. The `regex`
//! crate has no lookaround, so both checks run after the search.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::ops::Range;

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::SqlMaskError;
use crate::redaction_match::MatchSpan;

/// The character every matched term is replaced with.
pub const MASK_CHAR: char = '*';

/// Returns true for the characters that make up a "word": ASCII letters,
/// ASCII digits and the underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// How a term's occurrences are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    /// Only word characters, e.g. `select`. Needs a word boundary on both ends.
    Atomic,
    /// Contains spaces, punctuation or symbols, e.g. `order by` or `*`.
    /// Needs a non-word character (or the text edge) on both outer sides.
    Compound,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Atomic => f.write_str("atomic"),
            TermKind::Compound => f.write_str("compound"),
        }
    }
}

/// Classifies a non-empty term.
pub fn classify(term: &str) -> TermKind {
    if term.chars().all(is_word_char) {
        TermKind::Atomic
    } else {
        TermKind::Compound
    }
}

/// An immutable rule that locates the standalone occurrences of one term.
#[derive(Debug, Clone)]
pub struct MatchSpec {
    term: String,
    /// `term` as `str::to_lowercase` renders it; candidates must equal this.
    folded: String,
    kind: TermKind,
    regex: Regex,
    mask: String,
}

/// Builds the match specification for a canonical term.
///
/// The term is re-validated so the builder stays correct on its own: an empty
/// (or all-whitespace) term is rejected with `InvalidTerm`.
pub fn build_matcher(term: &str) -> Result<MatchSpec, SqlMaskError> {
    if term.trim().is_empty() {
        return Err(SqlMaskError::InvalidTerm("term must not be blank".to_string()));
    }

    let kind = classify(term);
    let regex = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| SqlMaskError::PatternCompilation(term.to_string(), e))?;

    debug!(
        target: "sqlmask_core::matcher",
        "Built {} matcher for a term of {} chars.",
        kind,
        term.chars().count()
    );

    Ok(MatchSpec {
        term: term.to_string(),
        folded: term.to_lowercase(),
        kind,
        regex,
        mask: MASK_CHAR.to_string().repeat(term.chars().count()),
    })
}

impl MatchSpec {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    /// The replacement written over each occurrence: one `*` per term character.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Byte ranges of every standalone occurrence, left to right, non-overlapping.
    ///
    /// A rejected candidate does not consume its span; the search resumes one
    /// character after the candidate's start.
    fn find_byte_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some(candidate) = self.regex.find_at(text, pos) else {
                break;
            };
            let (start, end) = (candidate.start(), candidate.end());
            if self.folds_to_term(&text[start..end]) && is_standalone(text, start, end) {
                ranges.push(start..end);
                pos = end;
            } else {
                pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }

        ranges
    }

    fn folds_to_term(&self, candidate: &str) -> bool {
        candidate.to_lowercase() == self.folded
    }

    /// Character-offset spans of every standalone occurrence in `text`.
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        char_spans(text, &self.find_byte_ranges(text))
    }

    pub fn count(&self, text: &str) -> usize {
        self.find_byte_ranges(text).len()
    }

    /// Replaces every occurrence with the mask and returns the new text together
    /// with the spans that were masked.
    pub fn apply(&self, text: &str) -> (String, Vec<MatchSpan>) {
        let ranges = self.find_byte_ranges(text);
        if ranges.is_empty() {
            return (text.to_string(), Vec::new());
        }

        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        for range in &ranges {
            out.push_str(&text[last_end..range.start]);
            out.push_str(&self.mask);
            last_end = range.end;
        }
        out.push_str(&text[last_end..]);

        (out, char_spans(text, &ranges))
    }
}

/// Converts ordered, non-overlapping byte ranges into character offsets.
fn char_spans(text: &str, ranges: &[Range<usize>]) -> Vec<MatchSpan> {
    let mut spans = Vec::with_capacity(ranges.len());
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for range in ranges {
        char_cursor += text[byte_cursor..range.start].chars().count();
        let start = char_cursor;
        char_cursor += text[range.start..range.end].chars().count();
        byte_cursor = range.end;
        spans.push(MatchSpan { start, end: char_cursor });
    }

    spans
}

/// Neither outer neighbor of `start..end` may be a word character; the text
/// edges count as non-word. For an atomic term this is the whole-word rule.
fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
