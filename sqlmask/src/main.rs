// sqlmask/src/main.rs
//! sqlmask entry point.
//!
//! Loads `.env`, parses the command line, sets up logging and the theme, then
//! hands off to the command dispatcher.

use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use sqlmask::cli::Cli;
use sqlmask::commands::error_msg;
use sqlmask::logger;
use sqlmask::ui::theme::build_theme_map;

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme_map = match build_theme_map(args.theme.as_ref()) {
        Ok(theme_map) => theme_map,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match sqlmask::run(args, &theme_map) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}
