//! Graph provider trait.

use std::sync::Arc;

use crate::graph::NavigationGraph;
use crate::keys::KeyMap;

/// Source of per-language navigation snapshots.
///
/// Implementations own loading and caching. Returned snapshots are shared,
/// read-only values; consumers never write them back. For a language the
/// provider knows nothing about, implementations return empty snapshots so
/// that lookups degrade to "not found" instead of failing.
pub trait GraphProvider: Send + Sync {
    /// Navigation graph for a language.
    fn navigation(&self, language: &str) -> Arc<NavigationGraph>;

    /// Page id to URL path mapping for a language.
    fn keys(&self, language: &str) -> Arc<KeyMap>;
}

impl<P: GraphProvider + ?Sized> GraphProvider for Arc<P> {
    fn navigation(&self, language: &str) -> Arc<NavigationGraph> {
        (**self).navigation(language)
    }

    fn keys(&self, language: &str) -> Arc<KeyMap> {
        (**self).keys(language)
    }
}
