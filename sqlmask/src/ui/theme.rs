// sqlmask/src/ui/theme.rs
//! Terminal colors for messages, diffs and summaries.
//!
//! A theme maps each [`ThemeEntry`] to a foreground color. Users may override
//! entries from a YAML file (`error: { fg: brightred }`); entries the file leaves
//! out keep their defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The parts of the output that can be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    /// The quoted term in a summary line.
    SummaryTermName,
    /// The occurrence count in a summary line.
    SummaryOccurrences,
}

const COLOR_NAMES: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

/// One of the 16 named ANSI colors, parsed case-insensitively from its name.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct ThemeColor(AnsiColors);

impl TryFrom<String> for ThemeColor {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        let lower = name.to_lowercase();
        COLOR_NAMES
            .iter()
            .find(|(known, _)| *known == lower)
            .map(|(_, color)| ThemeColor(*color))
            .ok_or_else(|| {
                let names: Vec<&str> = COLOR_NAMES.iter().map(|(known, _)| *known).collect();
                format!("invalid theme color '{}'; expected one of: {}", name, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// Loads the theme file if one was given, otherwise the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

impl ThemeStyle {
    fn fg(color: AnsiColors) -> Self {
        ThemeStyle { fg: Some(ThemeColor(color)) }
    }

    /// Reads a YAML theme and fills in the entries it does not set.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    pub fn default_theme_map() -> ThemeMap {
        HashMap::from([
            (ThemeEntry::Header, Self::fg(AnsiColors::Cyan)),
            (ThemeEntry::Success, Self::fg(AnsiColors::Green)),
            (ThemeEntry::Info, Self::fg(AnsiColors::White)),
            (ThemeEntry::Warn, Self::fg(AnsiColors::Yellow)),
            (ThemeEntry::Error, Self::fg(AnsiColors::Red)),
            (ThemeEntry::DiffAdded, Self::fg(AnsiColors::Green)),
            (ThemeEntry::DiffRemoved, Self::fg(AnsiColors::Red)),
            (ThemeEntry::DiffHeader, Self::fg(AnsiColors::Yellow)),
            (ThemeEntry::SummaryTermName, Self::fg(AnsiColors::Magenta)),
            (ThemeEntry::SummaryOccurrences, Self::fg(AnsiColors::White)),
        ])
    }
}

/// Returns the configured foreground color for `entry`, if any.
pub fn color_for(entry: &ThemeEntry, theme_map: &ThemeMap) -> Option<AnsiColors> {
    theme_map.get(entry).and_then(|style| style.fg).map(|color| color.0)
}
