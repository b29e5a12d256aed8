//! Configuration management for `sqlmask-core`.
//!
//! This module defines the term-list document used for the embedded defaults,
//! user overrides and seed files. It handles YAML/JSON deserialization and
//! provides utilities for loading, merging and validating term lists.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use log::{debug, info};

use crate::errors::SqlMaskError;
use crate::normalize::normalize_term;

/// A list of raw terms, in application order.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TermConfig {
    #[serde(default)]
    pub terms: Vec<String>,
}

impl TermConfig {
    /// Loads a term list from a YAML file (`terms: [...]`).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom terms from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read term file {}", path.display()))?;
        let config: TermConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse term file {}", path.display()))?;

        validate_terms(&config.terms)?;
        info!("Loaded {} terms from file {}.", config.terms.len(), path.display());

        Ok(config)
    }

    /// Loads the default term list from the embedded configuration.
    pub fn load_default_terms() -> Result<Self> {
        debug!("Loading default terms from embedded string...");
        let default_yaml = include_str!("../config/default_terms.yaml");
        let config: TermConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default terms")?;

        debug!("Loaded {} default terms.", config.terms.len());
        Ok(config)
    }
}

/// Reads a seed file: either a JSON array of strings or a YAML `TermConfig`.
///
/// Seed files may repeat terms; duplicates are resolved when seeding, so only
/// blank entries are rejected here.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let terms = match serde_json::from_str::<Vec<String>>(&text) {
        Ok(terms) => terms,
        Err(json_err) => {
            debug!("Seed file is not a JSON array ({}), trying YAML.", json_err);
            serde_yml::from_str::<TermConfig>(&text)
                .with_context(|| format!("Failed to parse seed file {}", path.display()))?
                .terms
        }
    };

    for (index, raw) in terms.iter().enumerate() {
        normalize_term(Some(raw.as_str()))
            .with_context(|| format!("Seed file {} entry #{} is invalid", path.display(), index))?;
    }
    info!("Read {} seed terms from {}.", terms.len(), path.display());
    Ok(terms)
}

/// Appends user terms to the defaults, skipping any whose canonical form is
/// already present. Default terms keep their position ahead of user terms.
///
/// A blank user term fails the whole merge with `InvalidTerm`.
pub fn merge_terms(
    default_config: TermConfig,
    user_config: Option<TermConfig>,
) -> Result<TermConfig, SqlMaskError> {
    debug!("merge_terms called. Initial default terms count: {}", default_config.terms.len());

    let mut seen = HashSet::new();
    for term in &default_config.terms {
        seen.insert(normalize_term(Some(term.as_str()))?);
    }
    let mut final_terms = default_config.terms;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user terms.", user_cfg.terms.len());
        for user_term in user_cfg.terms {
            let canonical = normalize_term(Some(user_term.as_str()))?;
            if seen.insert(canonical) {
                final_terms.push(user_term);
            } else {
                debug!("Skipping user term already present in defaults.");
            }
        }
    }

    debug!("Final total terms after merge: {}", final_terms.len());
    Ok(TermConfig { terms: final_terms })
}

/// Validates a term list: every term must normalize, and no two may share a
/// canonical form.
fn validate_terms(terms: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for (index, raw) in terms.iter().enumerate() {
        match normalize_term(Some(raw.as_str())) {
            Ok(canonical) => {
                if !seen.insert(canonical.clone()) {
                    errors.push(format!("Duplicate term found: '{}'.", canonical));
                }
            }
            Err(e) => errors.push(format!("Term #{}: {}", index, e)),
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Term validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terms_are_valid_and_unique() {
        let config = TermConfig::load_default_terms().unwrap();
        assert!(!config.terms.is_empty());
        assert!(validate_terms(&config.terms).is_ok());
        assert!(config.terms.iter().any(|t| t == "order by"));
    }

    #[test]
    fn validate_reports_blank_and_duplicate() {
        let terms = vec!["select".to_string(), " ".to_string(), "SELECT".to_string()];
        let message = validate_terms(&terms).unwrap_err().to_string();
        assert!(message.contains("Term #1"));
        assert!(message.contains("Duplicate term found: 'select'"));
    }

    #[test]
    fn merge_appends_only_new_terms() {
        let defaults = TermConfig { terms: vec!["select".into(), "from".into()] };
        let user = TermConfig { terms: vec!["FROM".into(), "salary".into(), " Salary ".into()] };
        let merged = merge_terms(defaults, Some(user)).unwrap();
        assert_eq!(merged.terms, vec!["select", "from", "salary"]);
    }

    #[test]
    fn merge_rejects_blank_user_term() {
        let defaults = TermConfig { terms: vec!["select".into()] };
        let user = TermConfig { terms: vec!["salary".into(), "  ".into()] };
        let err = merge_terms(defaults, Some(user)).unwrap_err();
        assert!(matches!(err, SqlMaskError::InvalidTerm(_)), "{:?}", err);
    }

    #[test]
    fn merge_without_user_config_keeps_defaults() {
        let defaults = TermConfig { terms: vec!["select".into()] };
        assert_eq!(merge_terms(defaults.clone(), None).unwrap(), defaults);
    }
}
