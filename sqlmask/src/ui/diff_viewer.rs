// sqlmask/src/ui/diff_viewer.rs
//! Line diff between the original input and its masked form.
//!
//! Removed lines are shown with `-` and added lines with `+`, colored through
//! the theme when the destination supports it.

use std::io::Write;

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a diff of `original` against `sanitized` to `writer`.
pub fn print_diff<W: Write + ?Sized>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let patch = create_patch(original, sanitized);
    writeln!(writer, "{}", styled("--- Diff View ---", ThemeEntry::DiffHeader, theme_map, enable_colors))?;

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
    }

    for hunk in patch.hunks() {
        for line_change in hunk.lines() {
            match line_change {
                DiffLine::Delete(s) => {
                    let text = format!("- {}", s.trim_end_matches(['\r', '\n']));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffRemoved, theme_map, enable_colors))?;
                }
                DiffLine::Insert(s) => {
                    let text = format!("+ {}", s.trim_end_matches(['\r', '\n']));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffAdded, theme_map, enable_colors))?;
                }
                DiffLine::Context(s) => {
                    writeln!(writer, "  {}", s.trim_end_matches(['\r', '\n']))?;
                }
            }
        }
    }

    writeln!(writer, "{}", styled("-----------------", ThemeEntry::DiffHeader, theme_map, enable_colors))?;
    Ok(())
}
