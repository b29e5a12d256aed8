// sqlmask/src/ui/output_format.rs
//! Themed status messages.
//!
//! Every printer takes the writer explicitly so callers decide between stdout
//! and stderr, and whether the destination supports color.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Renders `text` in the color configured for `entry`, or plain when colors are disabled.
pub fn styled(text: &str, entry: ThemeEntry, theme_map: &ThemeMap, enable_colors: bool) -> String {
    match color_for(&entry, theme_map) {
        Some(color) if enable_colors => text.color(color).to_string(),
        _ => text.to_string(),
    }
}

fn print_prefixed<W: Write + ?Sized>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, message);
    writeln!(writer, "{}", styled(&line, entry, theme_map, enable_colors))
}

pub fn print_info_message<W: Write + ?Sized>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Info, theme_map, enable_colors)
}

pub fn print_success_message<W: Write + ?Sized>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Success, theme_map, enable_colors)
}

pub fn print_warn_message<W: Write + ?Sized>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", message, ThemeEntry::Warn, theme_map, enable_colors)
}

pub fn print_error_message<W: Write + ?Sized>(
    writer: &mut W,
    message: &str,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Error: ", message, ThemeEntry::Error, theme_map, enable_colors)
}
