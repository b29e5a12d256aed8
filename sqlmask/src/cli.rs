// sqlmask/src/cli.rs
//! This file defines the command-line interface (CLI) for the sqlmask application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "sqlmask",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask sensitive SQL words and phrases in text",
    long_about = "sqlmask replaces every standalone occurrence of a catalog term with asterisks of the same length. Single words only match as whole words; phrases and symbols only match when nothing word-like touches their outer edges. The term catalog is stored as JSON and maintained with the `terms` command.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path of the term catalog JSON file.
    #[arg(
        long = "catalog",
        value_name = "FILE",
        env = "SQLMASK_CATALOG",
        global = true,
        help = "Path to the term catalog file (defaults to the user data directory)."
    )]
    pub catalog: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `sqlmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks every catalog term in an input file, a literal text or stdin.
    #[command(about = "Masks every catalog term in an input file, a literal text or stdin.")]
    Sanitize(SanitizeCommand),

    /// Counts catalog terms in the input without printing the masked text.
    #[command(about = "Counts catalog terms in the input without printing the masked text.")]
    Scan(ScanCommand),

    /// Maintains the term catalog.
    #[command(subcommand, about = "Lists, adds, updates, removes and seeds catalog terms.")]
    Terms(TermsCommand),
}

/// Where the text to process comes from. Stdin is used when neither is given.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "text", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Literal text to process.
    #[arg(long, short = 't', value_name = "TEXT", help = "Process this text instead of reading stdin.")]
    pub text: Option<String>,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Extra terms appended to the catalog for this run only.
    #[arg(long = "terms-file", value_name = "FILE", help = "Append the terms of a YAML term file (`terms: [...]`) to the catalog for this run.")]
    pub terms_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', help = "Show a diff of the original and masked text.")]
    pub diff: bool,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(
        long = "line-buffered",
        conflicts_with_all = ["diff", "output", "input_file", "text"],
        help = "Process stdin line by line (useful for streaming data from pipes)."
    )]
    pub line_buffered: bool,

    /// Suppress the redaction summary.
    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Extra terms appended to the catalog for this run only.
    #[arg(long = "terms-file", value_name = "FILE", help = "Append the terms of a YAML term file (`terms: [...]`) to the catalog for this run.")]
    pub terms_file: Option<PathBuf>,

    /// Exit with a non-zero code if the total number of masked occurrences exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the total number of occurrences exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,

    /// Export scan summary to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the scan report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print scan summary as JSON to stdout (conflicts with --json-file).
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the scan report to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Subcommands for the `terms` command.
#[derive(Subcommand, Debug)]
pub enum TermsCommand {
    #[command(about = "Lists all catalog terms, alphabetically.")]
    List,
    #[command(about = "Adds a word or phrase to the catalog.")]
    Add {
        /// The word or phrase to add.
        #[arg(value_name = "WORD", help = "The word or phrase to add.")]
        word: String,
    },
    #[command(about = "Replaces the word stored under an id.")]
    Update {
        /// Id of the term to change.
        #[arg(value_name = "ID", help = "Id of the term to change.")]
        id: u64,
        /// The new word or phrase.
        #[arg(value_name = "WORD", help = "The new word or phrase.")]
        word: String,
    },
    #[command(about = "Removes the term with the given id.")]
    Remove {
        /// Id of the term to remove.
        #[arg(value_name = "ID", help = "Id of the term to remove.")]
        id: u64,
    },
    #[command(about = "Adds every term from a seed file (or the built-in list) that is not already present.")]
    Seed {
        /// JSON array of strings, or YAML `terms:` list.
        #[arg(value_name = "FILE", help = "Seed file: a JSON array of strings or a YAML `terms:` list.")]
        file: Option<PathBuf>,
    },
}
