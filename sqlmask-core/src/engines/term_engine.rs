// sqlmask-core/src/engines/term_engine.rs
//! A `SanitizationEngine` implementation that masks catalog terms.
//!
//! Terms are applied one at a time in snapshot order. Each term's replacements
//! are committed to the working text before the next term is matched, so a
//! later term sees the masks written by earlier ones.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;
use anyhow::{Context, Result};
use log::debug;

use crate::engine::SanitizationEngine;
use crate::redaction_match::{log_term_match_debug, TermMatch, TermSummaryItem};
use crate::sanitizers::compiler::{get_or_compile_terms, CompiledTerms};

#[derive(Debug, Clone)]
pub struct TermEngine {
    compiled_terms: Arc<CompiledTerms>,
}

impl TermEngine {
    /// Builds an engine from a snapshot of raw terms, in application order.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let compiled_terms = get_or_compile_terms(terms)
            .context("Failed to compile terms for TermEngine")?;
        Ok(Self { compiled_terms })
    }

    /// Wraps an already compiled term set.
    pub fn from_compiled(compiled_terms: Arc<CompiledTerms>) -> Self {
        Self { compiled_terms }
    }

    /// Masks `content` without collecting a report.
    pub fn mask_text(&self, content: &str) -> String {
        self.run_pass(content).0
    }

    /// The sequential masking pass shared by every public operation.
    fn run_pass(&self, content: &str) -> (String, Vec<TermMatch>) {
        let mut working = content.to_string();
        let mut matches = Vec::new();

        if working.is_empty() {
            return (working, matches);
        }

        for spec in &self.compiled_terms.matchers {
            let (masked, spans) = spec.apply(&working);
            if spans.is_empty() {
                continue;
            }
            for span in &spans {
                log_term_match_debug("[sqlmask_core::term_engine]", spec.term(), span);
                matches.push(TermMatch {
                    term: spec.term().to_string(),
                    kind: spec.kind(),
                    start: span.start,
                    end: span.end,
                    masked: spec.mask().to_string(),
                });
            }
            working = masked;
        }

        debug!(
            "Masking pass complete: {} terms, {} occurrences masked.",
            self.compiled_terms.len(),
            matches.len()
        );
        (working, matches)
    }
}

/// Collapses matches into per-term counts, keeping application order.
fn summarize(matches: &[TermMatch]) -> Vec<TermSummaryItem> {
    let mut summary: Vec<TermSummaryItem> = Vec::new();
    for m in matches {
        match summary.last_mut() {
            Some(item) if item.term == m.term => item.occurrences += 1,
            _ => summary.push(TermSummaryItem {
                term: m.term.clone(),
                kind: m.kind,
                occurrences: 1,
            }),
        }
    }
    summary
}

impl SanitizationEngine for TermEngine {
    fn sanitize(&self, content: &str) -> Result<(String, Vec<TermSummaryItem>)> {
        let (sanitized, matches) = self.run_pass(content);
        Ok((sanitized, summarize(&matches)))
    }

    fn analyze_for_stats(&self, content: &str) -> Result<Vec<TermSummaryItem>> {
        let (_, matches) = self.run_pass(content);
        Ok(summarize(&matches))
    }

    fn find_matches(&self, content: &str) -> Result<Vec<TermMatch>> {
        let (_, mut matches) = self.run_pass(content);
        matches.sort_by_key(|m| m.start);
        Ok(matches)
    }

    fn compiled_terms(&self) -> &CompiledTerms {
        &self.compiled_terms
    }
}
