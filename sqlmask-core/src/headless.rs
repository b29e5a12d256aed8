// sqlmask-core/src/headless.rs
//! Convenience wrappers for using the core engine in headless mode (non-UI).
//! Provides one-shot sanitization of a single text against a term snapshot.

use std::sync::Arc;

use anyhow::Result;

use crate::engine::SanitizationEngine;
use crate::engines::term_engine::TermEngine;
use crate::errors::SqlMaskError;
use crate::sanitizers::compiler::compile_terms;

/// Masks every standalone occurrence of every term in `text`.
///
/// An absent text is echoed back as `None` and an empty text is returned as
/// is; neither is an error. The terms are normalized here, so a blank entry in
/// the snapshot fails with `InvalidTerm` even when the text is absent or empty.
/// Terms are applied in the order supplied, duplicates after normalization are
/// ignored.
pub fn sanitize<S: AsRef<str>>(terms: &[S], text: Option<&str>) -> Result<Option<String>, SqlMaskError> {
    let compiled = compile_terms(terms)?;
    let Some(text) = text else {
        return Ok(None);
    };
    if text.is_empty() || compiled.is_empty() {
        return Ok(Some(text.to_string()));
    }

    let engine = TermEngine::from_compiled(Arc::new(compiled));
    Ok(Some(engine.mask_text(text)))
}

/// Fully sanitizes an input string with an engine built from `terms`.
/// This function is the primary entry point for non-interactive (headless) use.
pub fn headless_sanitize_string<S: AsRef<str>>(terms: &[S], content: &str) -> Result<String> {
    let engine: Box<dyn SanitizationEngine> = Box::new(TermEngine::new(terms)?);
    let (sanitized_content, _) = engine.sanitize(content)?;
    Ok(sanitized_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_reference_scenario() {
        let out = sanitize(&["select", "order by", "*"], Some("Select * from t order by name")).unwrap();
        assert_eq!(out.as_deref(), Some("****** * from t ******** name"));
    }

    #[test]
    fn test_sanitize_absent_and_empty_text() {
        assert_eq!(sanitize(&["select"], None).unwrap(), None);
        assert_eq!(sanitize(&["select"], Some("")).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_sanitize_rejects_blank_catalog_entry() {
        let err = sanitize(&["select", "  "], Some("select 1")).unwrap_err();
        assert!(matches!(err, SqlMaskError::InvalidTerm(_)));
    }

    #[test]
    fn test_sanitize_ignores_case_duplicates() {
        let out = sanitize(&["FROM", "from", " From "], Some("x from y")).unwrap();
        assert_eq!(out.as_deref(), Some("x **** y"));
    }

    #[test]
    fn test_headless_sanitize_string() -> Result<()> {
        let sanitized = headless_sanitize_string(&["drop table", "truncate"], "DROP TABLE users; truncate logs")?;
        assert_eq!(sanitized, "********** users; ******** logs");
        Ok(())
    }
}
