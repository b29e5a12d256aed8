// sqlmask/src/commands/mod.rs
//! Command implementations and the dispatcher used by `main`.

pub mod sanitize;
pub mod scan;
pub mod terms;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use sqlmask_core::{merge_terms, TermCatalog, TermConfig};

use crate::cli::{Cli, Commands, InputArgs};
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;
use crate::utils::catalog_store::CatalogStore;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the command input: `--text`, then `--input-file`, then stdin.
pub fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input_file {
        debug!("Reading input from file: {}", path.display());
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    debug!("Reading input from stdin.");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Loads the stored catalog and appends the terms of `terms_file`, if given.
///
/// The extra terms only live for this run; the stored catalog is not touched.
pub fn effective_catalog(store: &CatalogStore, terms_file: Option<&Path>) -> Result<TermCatalog> {
    let catalog = store.load()?;
    let Some(path) = terms_file else {
        return Ok(catalog);
    };

    let user = TermConfig::load_from_file(path)?;
    let merged = merge_terms(TermConfig { terms: catalog.snapshot() }, Some(user))?;
    debug!(
        "Using {} terms ({} from the catalog).",
        merged.terms.len(),
        catalog.len()
    );
    Ok(TermCatalog::from_terms(&merged.terms)?)
}

/// Runs the parsed command line. Errors are reported by the caller.
pub fn run(cli: Cli, theme_map: &ThemeMap) -> Result<ExitCode> {
    let store = CatalogStore::resolve(cli.catalog);

    match cli.command {
        Commands::Sanitize(cmd) => {
            let engine = effective_catalog(&store, cmd.terms_file.as_deref())?.engine()?;
            if cmd.line_buffered {
                let stdin = io::stdin();
                let stdout = io::stdout();
                sanitize::run_line_buffered(&engine, stdin.lock(), stdout.lock())?;
            } else {
                let opts = sanitize::SanitizeOptions {
                    input: read_input(&cmd.input)?,
                    diff: cmd.diff,
                    output_path: cmd.output,
                    no_redaction_summary: cmd.no_summary,
                    quiet: cli.quiet,
                };
                sanitize::run_sanitize(&engine, opts, theme_map)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scan(cmd) => {
            let catalog = effective_catalog(&store, cmd.terms_file.as_deref())?;
            let input = read_input(&cmd.input)?;
            scan::run_scan(&catalog, &input, &cmd, cli.quiet, theme_map)
        }
        Commands::Terms(cmd) => {
            terms::run_terms(&store, cmd, cli.quiet, theme_map)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
