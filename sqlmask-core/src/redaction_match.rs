// sqlmask-core/src/redaction_match.rs
//! Provides core data structures and utility functions for reporting masked
//! occurrences and for logging them without leaking the matched text.

use serde::{Serialize, Deserialize};
use log::debug;

use lazy_static::lazy_static;

use crate::matcher::TermKind;

lazy_static! {
    /// A static boolean that is initialized once to determine if matched text is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("SQLMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A half-open span `[start, end)` in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Represents a single masked occurrence of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    pub term: String,
    pub kind: TermKind,
    pub start: usize,
    pub end: usize,
    pub masked: String,
}

/// Number of occurrences masked for one term during a sanitization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSummaryItem {
    pub term: String,
    pub kind: TermKind,
    pub occurrences: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_term_match_debug(
    module_path: &str,
    term: &str,
    span: &MatchSpan,
) {
    debug!("{} Masked term '{}' at chars {}..{}",
        module_path,
        get_loggable_content(term),
        span.start,
        span.end
    );
}
