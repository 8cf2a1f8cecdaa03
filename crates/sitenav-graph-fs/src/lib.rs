//! Filesystem snapshot provider for sitenav.
//!
//! This crate provides [`FsGraphProvider`], a filesystem-based implementation
//! of the [`GraphProvider`](sitenav_graph::GraphProvider) trait. It reads the
//! snapshots written by the external cache builder:
//!
//! ```text
//! <root>/
//!   en/
//!     navigation.json   # type -> parent id -> page id -> stored page
//!     keys.json         # page id -> URL path
//!   nl/
//!     ...
//! ```
//!
//! Snapshots are decoded once per load and shared as `Arc` values. Loads
//! happen eagerly through [`FsGraphProvider::open`] or lazily on first access
//! to a language; [`FsGraphProvider::reload`] swaps in fresh snapshots.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sitenav_graph::{GraphProvider, MalformedAuthPolicy};
//! use sitenav_graph_fs::FsGraphProvider;
//!
//! let provider = FsGraphProvider::open(
//!     PathBuf::from("var/navigation"),
//!     &["en".to_owned()],
//!     MalformedAuthPolicy::FailOpen,
//! )?;
//! let keys = provider.keys("en");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use sitenav_graph::{
    GraphError, GraphProvider, KeyMap, MalformedAuthPolicy, NavigationGraph, StoredGraph,
    decode_graph,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Navigation snapshot filename inside a language directory.
const NAVIGATION_FILE: &str = "navigation.json";

/// Key map snapshot filename inside a language directory.
const KEYS_FILE: &str = "keys.json";

/// Both snapshots of one language.
#[derive(Debug, Default)]
struct LanguageSnapshot {
    navigation: Arc<NavigationGraph>,
    keys: Arc<KeyMap>,
}

/// Filesystem-backed graph provider.
///
/// # Thread Safety
///
/// Snapshots live behind an `RwLock<HashMap<_, Arc<_>>>`. Readers clone the
/// `Arc` and release the lock immediately; reloads build the new snapshot
/// outside the lock and swap it in.
#[derive(Debug)]
pub struct FsGraphProvider {
    root: PathBuf,
    policy: MalformedAuthPolicy,
    snapshots: RwLock<HashMap<String, Arc<LanguageSnapshot>>>,
    empty: Arc<LanguageSnapshot>,
}

impl FsGraphProvider {
    /// Create a provider that loads languages lazily.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding one subdirectory per language
    /// * `policy` - Handling of undecodable auth data
    #[must_use]
    pub fn new(root: PathBuf, policy: MalformedAuthPolicy) -> Self {
        Self {
            root,
            policy,
            snapshots: RwLock::new(HashMap::new()),
            empty: Arc::default(),
        }
    }

    /// Create a provider and load the given languages eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] raised while loading a language.
    pub fn open(
        root: PathBuf,
        languages: &[String],
        policy: MalformedAuthPolicy,
    ) -> Result<Self, GraphError> {
        let provider = Self::new(root, policy);
        for language in languages {
            provider.load(language)?;
        }
        Ok(provider)
    }

    /// Languages with a loaded snapshot, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<_> = self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        languages.sort();
        languages
    }

    /// Load (or re-load) the snapshots of one language.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if a snapshot file is missing, unreadable or
    /// does not describe a valid graph. The previous snapshot, if any, stays
    /// in place on error.
    pub fn load(&self, language: &str) -> Result<(), GraphError> {
        let snapshot = self.read_snapshot(language)?;
        tracing::info!(
            language,
            pages = snapshot.navigation.len(),
            keys = snapshot.keys.len(),
            "Loaded navigation snapshot"
        );
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(language.to_owned(), Arc::new(snapshot));
        Ok(())
    }

    /// Re-load every language loaded so far.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`]; languages loaded before the failure
    /// keep their fresh snapshots.
    pub fn reload(&self) -> Result<(), GraphError> {
        for language in self.languages() {
            self.load(&language)?;
        }
        Ok(())
    }

    /// Read and decode both snapshot files of a language.
    fn read_snapshot(&self, language: &str) -> Result<LanguageSnapshot, GraphError> {
        let dir = self.root.join(language);

        let stored: StoredGraph = read_json(&dir.join(NAVIGATION_FILE), language)?;
        let navigation = decode_graph(stored, language, self.policy)
            .map_err(|e| e.with_backend(BACKEND).with_path(dir.join(NAVIGATION_FILE)))?;
        let keys: KeyMap = read_json(&dir.join(KEYS_FILE), language)?;

        Ok(LanguageSnapshot {
            navigation: Arc::new(navigation),
            keys: Arc::new(keys),
        })
    }

    /// Get the snapshot of a language, loading it on first access.
    ///
    /// A language that fails to load is not remembered: lookups get an empty
    /// snapshot and degrade to "not found", and the next access tries again.
    fn snapshot(&self, language: &str) -> Arc<LanguageSnapshot> {
        if let Some(snapshot) = self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(language)
        {
            return Arc::clone(snapshot);
        }

        let snapshot = match self.read_snapshot(language) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(language, error = %e, "Failed to load navigation snapshot");
                return Arc::clone(&self.empty);
            }
        };

        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            snapshots
                .entry(language.to_owned())
                .or_insert_with(|| Arc::new(snapshot)),
        )
    }
}

impl GraphProvider for FsGraphProvider {
    fn navigation(&self, language: &str) -> Arc<NavigationGraph> {
        Arc::clone(&self.snapshot(language).navigation)
    }

    fn keys(&self, language: &str) -> Arc<KeyMap> {
        Arc::clone(&self.snapshot(language).keys)
    }
}

/// Read and parse a JSON snapshot file.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path, language: &str) -> Result<T, GraphError> {
    let content = fs::read_to_string(path).map_err(|e| {
        GraphError::io(e, path)
            .with_backend(BACKEND)
            .with_language(language)
    })?;
    serde_json::from_str(&content).map_err(|e| {
        GraphError::parse(e, path)
            .with_backend(BACKEND)
            .with_language(language)
    })
}
