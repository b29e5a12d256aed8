//! compiler.rs - Manages the compilation and caching of term matchers.
//!
//! This module provides a thread-safe, cached mechanism to convert a term
//! snapshot into `CompiledTerms`, one `MatchSpec` per distinct canonical term,
//! in the order the terms were supplied. It uses a global, shared cache to
//! avoid redundant compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use crate::errors::SqlMaskError;
use crate::matcher::{build_matcher, MatchSpec};
use crate::normalize::normalize_term;

/// Represents a collection of compiled term matchers, in application order.
#[derive(Debug)]
pub struct CompiledTerms {
    pub matchers: Vec<MatchSpec>,
}

impl CompiledTerms {
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(MatchSpec::term)
    }
}

/// Upper bound on cached snapshots; the cache is emptied when it is reached.
const MAX_CACHED_SNAPSHOTS: usize = 64;

/// A cached compilation together with the snapshot it was built from.
struct CacheEntry {
    snapshot: Vec<String>,
    compiled: Arc<CompiledTerms>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled term sets.
    /// The key is an order-sensitive hash of the raw snapshot; a hit is only
    /// served when the stored snapshot is equal to the requested one.
    static ref COMPILED_TERMS_CACHE: RwLock<HashMap<u64, CacheEntry>> = RwLock::new(HashMap::new());
}

fn same_snapshot<S: AsRef<str>>(stored: &[String], terms: &[S]) -> bool {
    stored.len() == terms.len() && stored.iter().zip(terms).all(|(a, b)| a == b.as_ref())
}

/// Hashes a snapshot to create the cache key.
///
/// The snapshot is hashed as given, without sorting: application order is
/// observable in the output, so two orderings are two different entries.
fn hash_terms<S: AsRef<str>>(terms: &[S]) -> u64 {
    let mut hasher = DefaultHasher::new();
    terms.len().hash(&mut hasher);
    for term in terms {
        term.as_ref().hash(&mut hasher);
    }
    hasher.finish()
}

/// Compiles a snapshot of raw terms into `CompiledTerms`.
///
/// Each term is normalized first; a term whose canonical form was already seen
/// is skipped, keeping the first occurrence's position. All invalid terms are
/// reported together.
pub fn compile_terms<S: AsRef<str>>(terms: &[S]) -> Result<CompiledTerms, SqlMaskError> {
    debug!("Starting compilation of {} terms.", terms.len());

    let mut matchers = Vec::with_capacity(terms.len());
    let mut seen = HashSet::new();
    let mut compilation_errors = Vec::new();

    for (index, raw) in terms.iter().enumerate() {
        let canonical = match normalize_term(Some(raw.as_ref())) {
            Ok(canonical) => canonical,
            Err(e) => {
                compilation_errors.push(format!("term #{}: {}", index, e));
                continue;
            }
        };

        if !seen.insert(canonical.clone()) {
            debug!("Skipping duplicate term at position {}.", index);
            continue;
        }

        match build_matcher(&canonical) {
            Ok(spec) => matchers.push(spec),
            Err(e) => compilation_errors.push(format!("term #{}: {}", index, e)),
        }
    }

    match compilation_errors.len() {
        0 => {
            debug!("Finished compiling terms. Total compiled: {}.", matchers.len());
            Ok(CompiledTerms { matchers })
        }
        1 => {
            let message = compilation_errors.remove(0);
            Err(SqlMaskError::InvalidTerm(message))
        }
        n => Err(SqlMaskError::InvalidTerm(format!(
            "{} terms failed to compile:\n{}",
            n,
            compilation_errors.join("\n")
        ))),
    }
}

/// Gets a `CompiledTerms` instance from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled terms. It returns an
/// `Arc` so engines built from the same snapshot share one compiled set.
pub fn get_or_compile_terms<S: AsRef<str>>(terms: &[S]) -> Result<Arc<CompiledTerms>> {
    let cache_key = hash_terms(terms);

    {
        let cache = COMPILED_TERMS_CACHE
            .read()
            .map_err(|_| SqlMaskError::Fatal("compiled term cache lock poisoned".to_string()))?;
        if let Some(entry) = cache.get(&cache_key) {
            if same_snapshot(&entry.snapshot, terms) {
                debug!("Serving compiled terms from cache for key: {}", &cache_key);
                return Ok(Arc::clone(&entry.compiled));
            }
            debug!("Cache key {} holds a different snapshot; recompiling.", &cache_key);
        }
    } // Read lock is released here.

    debug!("Compiled terms not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_terms(terms)?);

    let mut cache = COMPILED_TERMS_CACHE
        .write()
        .map_err(|_| SqlMaskError::Fatal("compiled term cache lock poisoned".to_string()))?;
    if cache.len() >= MAX_CACHED_SNAPSHOTS && !cache.contains_key(&cache_key) {
        debug!("Compiled term cache is full ({} entries); clearing it.", cache.len());
        cache.clear();
    }
    cache.insert(
        cache_key,
        CacheEntry {
            snapshot: terms.iter().map(|t| t.as_ref().to_string()).collect(),
            compiled: Arc::clone(&compiled_arc),
        },
    );

    debug!("Successfully compiled and cached terms for key: {}", &cache_key);
    Ok(compiled_arc)
}
