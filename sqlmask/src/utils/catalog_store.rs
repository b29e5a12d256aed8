// sqlmask/src/utils/catalog_store.rs
//! On-disk persistence of the term catalog.
//!
//! The catalog lives in a single JSON document. A missing file stands for the
//! embedded default term list; the file is only created once a `terms` command
//! changes something. Every read-modify-write cycle holds an exclusive lock on a
//! sidecar `.lock` file, and writes go through a temp file that is renamed into
//! place.

use anyhow::{Context, Result};
use fs2::FileExt;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use sqlmask_core::config::TermConfig;
use sqlmask_core::TermCatalog;

const CATALOG_FILE_NAME: &str = "terms.json";
const TMP_SUFFIX: &str = ".tmp";
const LOCK_SUFFIX: &str = ".lock";

/// `<data_dir>/sqlmask/terms.json`, or `./terms.json` if the platform has no data dir.
pub fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("sqlmask").join(CATALOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CATALOG_FILE_NAME))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `path` if given, otherwise the platform default.
    pub fn resolve(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_catalog_path);
        debug!("Using term catalog at {}", path.display());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, falling back to the embedded defaults when no file exists.
    pub fn load(&self) -> Result<TermCatalog> {
        if !self.path.exists() {
            debug!("No catalog file at {}; using default terms.", self.path.display());
            return default_catalog();
        }

        let mut file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open catalog {}", self.path.display()))?;
        FileExt::lock_shared(&file)
            .with_context(|| format!("Failed to lock catalog {}", self.path.display()))?;
        let mut raw = String::new();
        let read = file.read_to_string(&mut raw);
        FileExt::unlock(&file)?;
        read.with_context(|| format!("Failed to read catalog {}", self.path.display()))?;

        if raw.trim().is_empty() {
            return default_catalog();
        }
        TermCatalog::from_json(&raw)
            .with_context(|| format!("Catalog file {} is invalid", self.path.display()))
    }

    /// Writes the catalog atomically.
    pub fn save(&self, catalog: &TermCatalog) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = catalog.to_json_pretty()?;
        let tmp_path = with_suffix(&self.path, TMP_SUFFIX);
        {
            let mut tmp = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            tmp.write_all(json.as_bytes())?;
            tmp.flush()?;
            tmp.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace catalog {}", self.path.display()))?;
        info!("Saved {} terms to {}.", catalog.len(), self.path.display());
        Ok(())
    }

    /// Loads, applies `change`, and saves, all under the catalog lock.
    /// Nothing is written when `change` fails.
    pub fn update<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut TermCatalog) -> Result<T>,
    {
        let _lock = self.lock_exclusive()?;
        let mut catalog = self.load()?;
        let value = change(&mut catalog)?;
        self.save(&catalog)?;
        Ok(value)
    }

    fn lock_exclusive(&self) -> Result<LockGuard> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let lock_path = with_suffix(&self.path, LOCK_SUFFIX);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        FileExt::lock_exclusive(&file)
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        Ok(LockGuard(file))
    }
}

/// Releases the catalog lock on drop.
struct LockGuard(File);

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.0);
    }
}

fn default_catalog() -> Result<TermCatalog> {
    let defaults = TermConfig::load_default_terms()?;
    TermCatalog::from_terms(&defaults.terms).context("Default term list is invalid")
}
