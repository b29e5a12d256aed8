// sqlmask/src/ui/redaction_summary.rs
//! Per-term occurrence summary printed after a sanitize or scan.

use std::io::Write;

use anyhow::Result;
use sqlmask_core::TermSummaryItem;

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn print_summary<W: Write + ?Sized>(
    summary: &[TermSummaryItem],
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", styled("--- Redaction Summary ---", ThemeEntry::Header, theme_map, enable_colors))?;

    if summary.is_empty() {
        writeln!(writer, "No sensitive terms found.")?;
        return Ok(());
    }

    for item in summary {
        let occurrences = format!(
            "{} {}",
            item.occurrences,
            if item.occurrences == 1 { "occurrence" } else { "occurrences" }
        );
        writeln!(
            writer,
            "{} ({}): {}",
            styled(&format!("'{}'", item.term), ThemeEntry::SummaryTermName, theme_map, enable_colors),
            item.kind,
            styled(&occurrences, ThemeEntry::SummaryOccurrences, theme_map, enable_colors),
        )?;
    }
    let total: usize = summary.iter().map(|item| item.occurrences).sum();
    writeln!(writer, "Total: {} masked across {} terms.", total, summary.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use sqlmask_core::TermKind;

    #[test]
    fn lists_terms_with_counts() {
        let summary = vec![
            TermSummaryItem { term: "select".into(), kind: TermKind::Atomic, occurrences: 2 },
            TermSummaryItem { term: "order by".into(), kind: TermKind::Compound, occurrences: 1 },
        ];
        let mut out = Vec::new();
        print_summary(&summary, &mut out, &ThemeStyle::default_theme_map(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("'select' (atomic): 2 occurrences"));
        assert!(text.contains("'order by' (compound): 1 occurrence\n"));
        assert!(text.contains("Total: 3 masked across 2 terms."));
    }

    #[test]
    fn empty_summary_says_so() {
        let mut out = Vec::new();
        print_summary(&[], &mut out, &ThemeStyle::default_theme_map(), false).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No sensitive terms found."));
    }
}
