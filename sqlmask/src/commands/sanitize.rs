// sqlmask/src/commands/sanitize.rs
//! `sqlmask sanitize`: masks catalog terms in the input and writes the result.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use sqlmask_core::{SanitizationEngine, TermSummaryItem};

use super::info_msg;
use crate::ui::diff_viewer;
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// Options for a single (non-streaming) sanitize run.
pub struct SanitizeOptions {
    pub input: String,
    pub diff: bool,
    pub output_path: Option<PathBuf>,
    pub no_redaction_summary: bool,
    pub quiet: bool,
}

/// Masks `opts.input`, writes the result (or a diff) and prints the summary.
pub fn run_sanitize(
    engine: &dyn SanitizationEngine,
    opts: SanitizeOptions,
    theme_map: &ThemeMap,
) -> Result<()> {
    info!("Starting sanitize operation.");

    let (sanitized_content, summary) = engine.sanitize(&opts.input).context("Sanitization failed")?;

    debug!(
        "Content sanitized. {} terms produced {} masked occurrences.",
        summary.len(),
        summary.iter().map(|item| item.occurrences).sum::<usize>()
    );

    handle_primary_output(&opts, &sanitized_content, theme_map)?;
    handle_redaction_summary(&summary, &opts, theme_map)?;

    info!("Sanitize operation completed.");
    Ok(())
}

fn write_content<W: Write + ?Sized>(writer: &mut W, content: &str) -> io::Result<()> {
    write!(writer, "{}", content)?;
    if !content.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}

fn handle_primary_output(
    opts: &SanitizeOptions,
    sanitized_content: &str,
    theme_map: &ThemeMap,
) -> Result<()> {
    if let Some(path) = &opts.output_path {
        if !opts.quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()), theme_map);
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized_content, &mut file, theme_map, false)?;
        } else {
            write_content(&mut file, sanitized_content)?;
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();

        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized_content, &mut writer, theme_map, supports_color)?;
        } else {
            write_content(&mut writer, sanitized_content)?;
        }
    }
    Ok(())
}

fn handle_redaction_summary(
    summary: &[TermSummaryItem],
    opts: &SanitizeOptions,
    theme_map: &ThemeMap,
) -> Result<()> {
    if !opts.no_redaction_summary && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(summary, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }
    Ok(())
}

/// Masks a single line with the given engine.
pub fn sanitize_single_line(line: &str, engine: &dyn SanitizationEngine) -> Result<String> {
    let (sanitized_content, _) = engine.sanitize(line)?;
    Ok(sanitized_content)
}

/// Masks `reader` line by line, flushing after every line so piped output
/// appears as soon as it is produced.
pub fn run_line_buffered<R: BufRead, W: Write>(
    engine: &dyn SanitizationEngine,
    reader: R,
    mut writer: W,
) -> Result<()> {
    info!("Starting line-buffered sanitize.");
    let mut lines = 0usize;
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        let sanitized = sanitize_single_line(&line, engine)?;
        writeln!(writer, "{}", sanitized)?;
        writer.flush()?;
        lines += 1;
    }
    debug!("Line-buffered sanitize processed {} lines.", lines);
    Ok(())
}
