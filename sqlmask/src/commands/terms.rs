// sqlmask/src/commands/terms.rs
//! `sqlmask terms`: catalog maintenance.
//!
//! Every mutation goes through [`CatalogStore::update`], so a rejected change
//! (blank, duplicate or unknown id) leaves the file untouched.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use log::info;
use std::io::{self, Write};

use sqlmask_core::config::{load_seed_file, TermConfig};
use sqlmask_core::{classify, TermCatalog, TermEntry};

use super::{info_msg, success_msg, warn_msg};
use crate::cli::TermsCommand;
use crate::ui::theme::ThemeMap;
use crate::utils::catalog_store::CatalogStore;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders the catalog alphabetically as a table.
pub fn render_table(catalog: &TermCatalog) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Term", "Kind", "Created", "Updated"]);

    for entry in catalog.list() {
        table.add_row(vec![
            entry.id.to_string(),
            entry.word.to_string(),
            classify(entry.word.as_str()).to_string(),
            entry.created_at.format(TIMESTAMP_FORMAT).to_string(),
            entry.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        ]);
    }
    table
}

pub fn run_terms(store: &CatalogStore, cmd: TermsCommand, quiet: bool, theme_map: &ThemeMap) -> Result<()> {
    let notify = |msg: String| {
        if !quiet {
            success_msg(msg, theme_map);
        }
    };

    match cmd {
        TermsCommand::List => {
            let catalog = store.load()?;
            if catalog.is_empty() {
                if !quiet {
                    info_msg("The term catalog is empty.", theme_map);
                }
                return Ok(());
            }
            writeln!(io::stdout(), "{}", render_table(&catalog))?;
        }
        TermsCommand::Add { word } => {
            let entry: TermEntry = store.update(|catalog| Ok(catalog.add(&word)?.clone()))?;
            info!("Added term #{}.", entry.id);
            notify(format!("Added term #{}: '{}'", entry.id, entry.word));
        }
        TermsCommand::Update { id, word } => {
            let entry: TermEntry = store.update(|catalog| Ok(catalog.update(id, &word)?.clone()))?;
            info!("Updated term #{}.", entry.id);
            notify(format!("Updated term #{}: '{}'", entry.id, entry.word));
        }
        TermsCommand::Remove { id } => {
            if store.load()?.get(id).is_none() {
                if !quiet {
                    warn_msg(format!("No term found with ID {}; nothing removed.", id), theme_map);
                }
                return Ok(());
            }
            store.update(|catalog| Ok(catalog.remove(id)))?;
            notify(format!("Removed term #{}.", id));
        }
        TermsCommand::Seed { file } => {
            let terms = match &file {
                Some(path) => load_seed_file(path)?,
                None => TermConfig::load_default_terms()?.terms,
            };
            let report = store.update(|catalog| Ok(catalog.seed(&terms)?))?;
            notify(format!(
                "Term seeding complete: inserted={}, skipped={}.",
                report.inserted, report.skipped
            ));
        }
    }
    Ok(())
}
