// sqlmask-core/src/catalog.rs
//! The term catalog: the stored set of sensitive words and phrases.
//!
//! Every stored word is canonical (see [`crate::normalize`]) and unique. Entries
//! carry a numeric id that never changes and is never reused, so callers can
//! update or remove a term by id. The catalog is a plain value: persisting it
//! is left to the caller (the CLI writes it as a JSON document).
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::engines::term_engine::TermEngine;
use crate::errors::SqlMaskError;
use crate::normalize::Term;

/// One stored term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub id: u64,
    pub word: Term,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of seeding a catalog from a list of raw terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCatalog {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    entries: Vec<TermEntry>,
}

impl TermCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog holding `raw_terms`, skipping duplicates.
    pub fn from_terms<S: AsRef<str>>(raw_terms: &[S]) -> Result<Self, SqlMaskError> {
        let mut catalog = Self::new();
        catalog.seed(raw_terms)?;
        Ok(catalog)
    }

    /// Parses a catalog document and checks its invariants.
    pub fn from_json(json: &str) -> Result<Self, SqlMaskError> {
        let mut catalog: TermCatalog = serde_json::from_str(json)?;

        let mut ids = HashSet::new();
        let mut words = HashSet::new();
        for entry in &catalog.entries {
            if !ids.insert(entry.id) {
                return Err(SqlMaskError::Serialization(format!("duplicate term id {}", entry.id)));
            }
            if !words.insert(entry.word.as_str()) {
                return Err(SqlMaskError::DuplicateTerm(entry.word.to_string()));
            }
        }

        let max_id = catalog.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| {
            SqlMaskError::Serialization(format!("term id {} leaves no room for new ids", max_id))
        })?;
        catalog.next_id = catalog.next_id.max(after_max);
        catalog.entries.sort_by_key(|e| e.id);
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String, SqlMaskError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted alphabetically by word.
    pub fn list(&self) -> Vec<&TermEntry> {
        let mut listed: Vec<&TermEntry> = self.entries.iter().collect();
        listed.sort_by(|a, b| a.word.cmp(&b.word).then(a.id.cmp(&b.id)));
        listed
    }

    pub fn get(&self, id: u64) -> Option<&TermEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-insensitive lookup. A blank query finds nothing.
    pub fn find(&self, word: &str) -> Option<&TermEntry> {
        let term = Term::new(word).ok()?;
        self.entries.iter().find(|e| e.word == term)
    }

    /// Adds a new term. Fails if it is blank or already stored.
    pub fn add(&mut self, raw: &str) -> Result<&TermEntry, SqlMaskError> {
        let word = Term::new(raw)?;
        if self.find(word.as_str()).is_some() {
            return Err(SqlMaskError::DuplicateTerm(word.into_string()));
        }

        let now = Utc::now();
        let id = self.allocate_id()?;
        debug!("Adding term with id {}.", id);
        self.entries.push(TermEntry {
            id,
            word,
            created_at: now,
            updated_at: now,
        });
        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    /// Replaces the word stored under `id`, keeping the id and its position in
    /// the application order.
    pub fn update(&mut self, id: u64, raw: &str) -> Result<&TermEntry, SqlMaskError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SqlMaskError::TermNotFound(id))?;

        let word = Term::new(raw)?;
        if let Some(other) = self.find(word.as_str()) {
            if other.id != id {
                return Err(SqlMaskError::DuplicateTerm(word.into_string()));
            }
        }

        let entry = &mut self.entries[index];
        entry.word = word;
        entry.updated_at = Utc::now();
        debug!("Updated term with id {}.", id);
        Ok(&self.entries[index])
    }

    /// Removes the entry with `id`. Removing an unknown id is not an error.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Inserts every term not already stored.
    ///
    /// All raw terms are validated, and the ids they need reserved, before
    /// anything is inserted, so a failed seed leaves the catalog untouched.
    pub fn seed<S: AsRef<str>>(&mut self, raw_terms: &[S]) -> Result<SeedReport, SqlMaskError> {
        let terms = raw_terms
            .iter()
            .map(|raw| Term::new(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut fresh = Vec::new();
        let mut seen = HashSet::new();
        for word in terms {
            if self.find(word.as_str()).is_none() && seen.insert(word.clone()) {
                fresh.push(word);
            }
        }
        let mut report = SeedReport {
            inserted: 0,
            skipped: raw_terms.len() - fresh.len(),
        };
        self.next_id
            .max(1)
            .checked_add(fresh.len() as u64)
            .ok_or_else(|| SqlMaskError::Fatal("term id space exhausted".to_string()))?;

        let now = Utc::now();
        for word in fresh {
            let id = self.allocate_id()?;
            self.entries.push(TermEntry {
                id,
                word,
                created_at: now,
                updated_at: now,
            });
            report.inserted += 1;
        }

        info!(
            "Term seeding complete: inserted={}, skipped={}.",
            report.inserted, report.skipped
        );
        Ok(report)
    }

    /// The canonical terms in application (insertion) order.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.word.to_string()).collect()
    }

    /// SHA-256 over the snapshot, identifying exactly which terms, in which
    /// order, produced a given output.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.word.as_str().as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }

    /// Builds a masking engine over the current snapshot.
    pub fn engine(&self) -> Result<TermEngine> {
        TermEngine::new(&self.snapshot())
    }

    fn allocate_id(&mut self) -> Result<u64, SqlMaskError> {
        let id = self.next_id.max(1);
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| SqlMaskError::Fatal("term id space exhausted".to_string()))?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SanitizationEngine;

    #[test]
    fn add_stores_normalized_word() {
        let mut catalog = TermCatalog::new();
        let entry = catalog.add("  SELECT  ").unwrap();
        assert_eq!(entry.word.as_str(), "select");
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn add_rejects_case_insensitive_duplicate() {
        let mut catalog = TermCatalog::new();
        catalog.add("select").unwrap();
        let err = catalog.add("SeLeCt").unwrap_err();
        assert!(matches!(err, SqlMaskError::DuplicateTerm(_)));
        assert!(err.to_string().to_lowercase().contains("exists"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn add_rejects_blank_word() {
        let mut catalog = TermCatalog::new();
        assert!(matches!(catalog.add("   "), Err(SqlMaskError::InvalidTerm(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn list_is_sorted_alphabetically() {
        let catalog = TermCatalog::from_terms(&["select", "ORDER BY", "*"]).unwrap();
        let words: Vec<&str> = catalog.list().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["*", "order by", "select"]);
    }

    #[test]
    fn snapshot_keeps_insertion_order() {
        let catalog = TermCatalog::from_terms(&["select", "ORDER BY", "*"]).unwrap();
        assert_eq!(catalog.snapshot(), vec!["select", "order by", "*"]);
    }

    #[test]
    fn update_keeps_id_and_normalizes() {
        let mut catalog = TermCatalog::from_terms(&["old"]).unwrap();
        let updated = catalog.update(1, "  OrDeR By ").unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.word.as_str(), "order by");
    }

    #[test]
    fn update_to_own_word_is_allowed() {
        let mut catalog = TermCatalog::from_terms(&["select"]).unwrap();
        assert!(catalog.update(1, "SELECT").is_ok());
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut catalog = TermCatalog::new();
        assert!(matches!(catalog.update(9, "select"), Err(SqlMaskError::TermNotFound(9))));
    }

    #[test]
    fn update_to_other_entry_word_fails() {
        let mut catalog = TermCatalog::from_terms(&["any", "select"]).unwrap();
        let err = catalog.update(1, "select").unwrap_err();
        assert!(matches!(err, SqlMaskError::DuplicateTerm(_)));
        assert_eq!(catalog.get(1).unwrap().word.as_str(), "any");
    }

    #[test]
    fn remove_is_idempotent_and_ids_are_not_reused() {
        let mut catalog = TermCatalog::from_terms(&["a", "b"]).unwrap();
        assert!(catalog.remove(2));
        assert!(!catalog.remove(2));
        assert_eq!(catalog.add("c").unwrap().id, 3);
    }

    #[test]
    fn seed_counts_inserted_and_skipped() {
        let mut catalog = TermCatalog::from_terms(&["select"]).unwrap();
        let report = catalog.seed(&["SELECT", "from", "From", "where"]).unwrap();
        assert_eq!(report, SeedReport { inserted: 2, skipped: 2 });
    }

    #[test]
    fn seed_with_invalid_term_inserts_nothing() {
        let mut catalog = TermCatalog::new();
        assert!(catalog.seed(&["select", " "]).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn json_round_trip_preserves_ids_and_next_id() {
        let mut catalog = TermCatalog::from_terms(&["select", "from"]).unwrap();
        catalog.remove(2);
        let restored = TermCatalog::from_json(&catalog.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn from_json_rejects_duplicate_words() {
        let json = r#"{"entries":[
            {"id":1,"word":"select","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"},
            {"id":2,"word":"SELECT","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}
        ]}"#;
        assert!(matches!(TermCatalog::from_json(json), Err(SqlMaskError::DuplicateTerm(_))));
    }

    #[test]
    fn from_json_repairs_missing_next_id() {
        let json = r#"{"entries":[
            {"id":7,"word":"select","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}
        ]}"#;
        let mut catalog = TermCatalog::from_json(json).unwrap();
        assert_eq!(catalog.add("from").unwrap().id, 8);
    }

    fn catalog_with_id(id: u64) -> String {
        format!(
            r#"{{"entries":[{{"id":{},"word":"select","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}}]}}"#,
            id
        )
    }

    #[test]
    fn from_json_rejects_id_at_the_top_of_the_range() {
        let err = TermCatalog::from_json(&catalog_with_id(u64::MAX)).unwrap_err();
        assert!(matches!(err, SqlMaskError::Serialization(_)), "{:?}", err);
    }

    #[test]
    fn exhausted_ids_fail_without_changing_the_catalog() {
        let mut catalog = TermCatalog::from_json(&catalog_with_id(u64::MAX - 2)).unwrap();
        assert_eq!(catalog.add("from").unwrap().id, u64::MAX - 1);

        let before = catalog.clone();
        assert!(matches!(catalog.add("where"), Err(SqlMaskError::Fatal(_))));
        assert!(matches!(catalog.seed(&["where", "drop"]), Err(SqlMaskError::Fatal(_))));
        assert_eq!(catalog, before);

        // Nothing new to insert needs no ids.
        assert_eq!(catalog.seed(&["SELECT"]).unwrap(), SeedReport { inserted: 0, skipped: 1 });
    }

    #[test]
    fn fingerprint_depends_on_order() {
        let a = TermCatalog::from_terms(&["select", "from"]).unwrap();
        let b = TermCatalog::from_terms(&["from", "select"]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn engine_uses_snapshot() -> Result<()> {
        let catalog = TermCatalog::from_terms(&["select", "order by", "*"])?;
        let (out, _) = catalog.engine()?.sanitize("Select * from t order by name")?;
        assert_eq!(out, "****** * from t ******** name");
        Ok(())
    }
}
