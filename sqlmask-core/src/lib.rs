// sqlmask-core/src/lib.rs
//! # SQLMask Core Library
//!
//! `sqlmask-core` provides the platform-independent logic for masking sensitive
//! terms in free text. It normalizes terms, builds boundary-aware matchers for
//! them, and applies a catalog of terms to text through the pluggable
//! `SanitizationEngine` trait.
//!
//! The library performs no terminal I/O. Persistence of a catalog is limited to
//! (de)serializing it; where it is stored is the caller's business.
//!
//! ## Modules
//!
//! * `normalize`: Canonical form of a term (trimmed, lower-cased) and the `Term` newtype.
//! * `matcher`: Classifies terms and builds the `MatchSpec` that locates standalone occurrences.
//! * `sanitizers`: Compiles ordered term lists into reusable, cached matcher sets.
//! * `engine`: Defines the `SanitizationEngine` trait.
//! * `engines`: Concrete engines. `TermEngine` applies terms sequentially.
//! * `headless`: One-shot helpers, including the null-propagating `sanitize`.
//! * `catalog`: The editable, id-addressed term catalog and its seeding rules.
//! * `config`: Embedded default terms, term files and seed files.
//! * `redaction_match`: Per-occurrence and per-term reporting types.
//! * `errors`: The crate's error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use sqlmask_core::{sanitize, TermCatalog};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut catalog = TermCatalog::new();
//!     catalog.seed(&["select", "order by", "*"])?;
//!
//!     let masked = sanitize(&catalog.snapshot(), Some("Select * from t order by name"))?;
//!     assert_eq!(masked.as_deref(), Some("****** * from t ******** name"));
//!
//!     assert_eq!(sanitize(&catalog.snapshot(), None)?, None);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Term-level failures are reported as [`SqlMaskError`]. Operations that touch
//! files or combine several steps return `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod catalog;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod matcher;
pub mod normalize;
pub mod redaction_match;
pub mod sanitizers;

/// Re-exports the term normalizer and the canonical term type.
pub use normalize::{normalize_term, Term};

/// Re-exports the match-pattern builder.
pub use matcher::{build_matcher, classify, is_word_char, MatchSpec, TermKind, MASK_CHAR};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SqlMaskError;

/// Re-exports the engine trait and its term-based implementation.
pub use engine::SanitizationEngine;
pub use engines::term_engine::TermEngine;

/// Re-exports types for detailed match reporting.
pub use redaction_match::{redact_sensitive, MatchSpan, TermMatch, TermSummaryItem};

/// Re-exports the term catalog.
pub use catalog::{SeedReport, TermCatalog, TermEntry};

/// Re-exports term list loading and merging.
pub use config::{load_seed_file, merge_terms, TermConfig};

/// Re-exports one-shot sanitization helpers.
pub use headless::{headless_sanitize_string, sanitize};

pub use sanitizers::compiler::{compile_terms, get_or_compile_terms, CompiledTerms};
