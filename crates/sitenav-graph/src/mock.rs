//! In-memory graph provider for testing.
//!
//! Provides [`MockGraphProvider`] for unit testing without snapshot files.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{NavigationGraph, NavigationType};
use crate::keys::KeyMap;
use crate::page::{PageId, PageRecord};
use crate::provider::GraphProvider;

/// Mock graph provider for testing.
///
/// Stores graphs and key maps in memory. Use the builder methods to
/// configure the mock with test data. Every page added with
/// [`with_page`](Self::with_page) goes to the current language, which starts
/// as `"en"` and changes with [`for_language`](Self::for_language).
///
/// # Example
///
/// ```ignore
/// use sitenav_graph::{MockGraphProvider, NavigationType, PageId, PageRecord};
///
/// let provider = MockGraphProvider::new()
///     .with_page(NavigationType::Page, PageId::ROOT, PageRecord::new(1, "Home"), "")
///     .with_page(NavigationType::Page, PageId::HOME, PageRecord::new(5, "About"), "about");
/// ```
#[derive(Debug)]
pub struct MockGraphProvider {
    language: String,
    graphs: HashMap<String, Arc<NavigationGraph>>,
    keys: HashMap<String, Arc<KeyMap>>,
    empty_graph: Arc<NavigationGraph>,
    empty_keys: Arc<KeyMap>,
}

impl Default for MockGraphProvider {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            graphs: HashMap::new(),
            keys: HashMap::new(),
            empty_graph: Arc::new(NavigationGraph::new()),
            empty_keys: Arc::new(KeyMap::new()),
        }
    }
}

impl MockGraphProvider {
    /// Create a new empty mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the language subsequent builder calls apply to.
    #[must_use]
    pub fn for_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Add a page to a bucket and register its URL path.
    #[must_use]
    pub fn with_page(
        mut self,
        ty: NavigationType,
        parent: PageId,
        page: PageRecord,
        path: impl Into<String>,
    ) -> Self {
        self.current_keys().insert(page.page_id, path);
        self.current_graph().insert(ty, parent, page);
        self
    }

    /// Register a URL path for a page that is not in the graph.
    #[must_use]
    pub fn with_key(mut self, page_id: PageId, path: impl Into<String>) -> Self {
        self.current_keys().insert(page_id, path);
        self
    }

    /// Register an empty bucket.
    #[must_use]
    pub fn with_bucket(mut self, ty: NavigationType, parent: PageId) -> Self {
        self.current_graph().ensure_bucket(ty, parent);
        self
    }

    fn current_graph(&mut self) -> &mut NavigationGraph {
        Arc::make_mut(self.graphs.entry(self.language.clone()).or_default())
    }

    fn current_keys(&mut self) -> &mut KeyMap {
        Arc::make_mut(self.keys.entry(self.language.clone()).or_default())
    }
}

impl GraphProvider for MockGraphProvider {
    fn navigation(&self, language: &str) -> Arc<NavigationGraph> {
        self.graphs
            .get(language)
            .map_or_else(|| Arc::clone(&self.empty_graph), Arc::clone)
    }

    fn keys(&self, language: &str) -> Arc<KeyMap> {
        self.keys
            .get(language)
            .map_or_else(|| Arc::clone(&self.empty_keys), Arc::clone)
    }
}
