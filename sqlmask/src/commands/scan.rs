// sqlmask/src/commands/scan.rs
//! `sqlmask scan`: reports how many occurrences of each term the input holds.
//!
//! Counts come from the same sequential pass `sanitize` performs, so a term that
//! re-matches masks written by earlier terms (the bare `*`) is counted for them
//! too.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use sqlmask_core::{SanitizationEngine, TermCatalog, TermSummaryItem};

use super::{error_msg, info_msg};
use crate::cli::ScanCommand;
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// Machine-readable scan result.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the ordered term list the scan ran with.
    pub catalog_fingerprint: String,
    pub catalog_terms: usize,
    pub total_occurrences: usize,
    pub terms: Vec<TermSummaryItem>,
}

impl ScanReport {
    pub fn build(catalog: &TermCatalog, input: &str) -> Result<Self> {
        let engine = catalog.engine()?;
        let terms = engine.analyze_for_stats(input).context("Scan failed")?;
        Ok(Self {
            generated_at: Utc::now(),
            catalog_fingerprint: catalog.fingerprint(),
            catalog_terms: catalog.len(),
            total_occurrences: terms.iter().map(|t| t.occurrences).sum(),
            terms,
        })
    }
}

pub fn run_scan(
    catalog: &TermCatalog,
    input: &str,
    cmd: &ScanCommand,
    quiet: bool,
    theme_map: &ThemeMap,
) -> Result<ExitCode> {
    let report = ScanReport::build(catalog, input)?;
    info!(
        "Scan complete: {} occurrences across {} terms.",
        report.total_occurrences,
        report.terms.len()
    );

    if cmd.json_stdout {
        let json = serde_json::to_string_pretty(&report)?;
        writeln!(io::stdout(), "{}", json)?;
    } else if let Some(path) = &cmd.json_file {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write scan report: {}", path.display()))?;
        if !quiet {
            info_msg(format!("Scan report written to {}", path.display()), theme_map);
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        redaction_summary::print_summary(&report.terms, &mut stdout.lock(), theme_map, supports_color)?;
    }

    if let Some(threshold) = cmd.fail_over_threshold {
        if report.total_occurrences > threshold {
            error_msg(
                format!(
                    "Found {} occurrences, exceeding the threshold of {}.",
                    report.total_occurrences, threshold
                ),
                theme_map,
            );
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_and_fingerprint() {
        let catalog = TermCatalog::from_terms(&["select", "from"]).unwrap();
        let report = ScanReport::build(&catalog, "select a from b; SELECT c").unwrap();
        assert_eq!(report.total_occurrences, 3);
        assert_eq!(report.catalog_terms, 2);
        assert_eq!(report.catalog_fingerprint, catalog.fingerprint());
        assert_eq!(report.terms[0].term, "select");
        assert_eq!(report.terms[0].occurrences, 2);
    }

    #[test]
    fn report_serializes_kind_in_snake_case() {
        let catalog = TermCatalog::from_terms(&["order by"]).unwrap();
        let report = ScanReport::build(&catalog, "x order by y").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["terms"][0]["kind"], "compound");
        assert_eq!(json["total_occurrences"], 1);
    }
}
