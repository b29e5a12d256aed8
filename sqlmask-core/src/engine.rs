// sqlmask-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The `SanitizationEngine` trait provides a pluggable interface between the
//! application layer and the masking logic. An engine is built from one term
//! snapshot and is immutable afterwards, so it can be shared across threads
//! and used for any number of sanitize calls.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::redaction_match::{TermMatch, TermSummaryItem};
use crate::sanitizers::compiler::CompiledTerms;

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Performs full sanitization on the provided content.
    ///
    /// Returns the masked content and, for every term that matched at least
    /// once, the number of occurrences it masked.
    fn sanitize(&self, content: &str) -> Result<(String, Vec<TermSummaryItem>)>;

    /// Runs the same pass as `sanitize` but only reports the summary.
    fn analyze_for_stats(&self, content: &str) -> Result<Vec<TermSummaryItem>>;

    /// Returns every masked occurrence, ordered by position.
    fn find_matches(&self, content: &str) -> Result<Vec<TermMatch>>;

    /// Returns a reference to the `CompiledTerms` used by the engine.
    fn compiled_terms(&self) -> &CompiledTerms;
}
