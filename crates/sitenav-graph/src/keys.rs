//! Page id to URL path mapping.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::page::PageId;

/// Language-scoped mapping from page id to URL path.
///
/// URL paths are stored without leading or trailing slashes (`""` for the
/// home page, `"about/team"` for nested pages). A reverse index is built on
/// construction so path lookups are O(1). When several ids share a path, the
/// first id in insertion order owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<PageId, String>", into = "IndexMap<PageId, String>")]
pub struct KeyMap {
    paths: IndexMap<PageId, String>,
    ids: HashMap<String, PageId>,
}

impl KeyMap {
    /// Create an empty key map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL path of a page.
    #[must_use]
    pub fn path(&self, page_id: PageId) -> Option<&str> {
        self.paths.get(&page_id).map(String::as_str)
    }

    /// Page owning a URL path.
    #[must_use]
    pub fn page_id(&self, path: &str) -> Option<PageId> {
        self.ids.get(path).copied()
    }

    /// Add or replace the URL path of a page.
    pub fn insert(&mut self, page_id: PageId, path: impl Into<String>) {
        let path = path.into();
        if let Some(old) = self.paths.insert(page_id, path.clone())
            && self.ids.get(&old) == Some(&page_id)
        {
            self.ids.remove(&old);
            self.reindex(&old);
        }
        let earlier_owner = self.ids.get(&path).is_some_and(|owner| {
            self.paths.get_index_of(owner) < self.paths.get_index_of(&page_id)
        });
        if !earlier_owner {
            self.ids.insert(path, page_id);
        }
    }

    /// Iterate `(page id, path)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, &str)> {
        self.paths.iter().map(|(id, path)| (*id, path.as_str()))
    }

    /// Number of pages with a URL.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when no page has a URL.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Restore the reverse entry for `path` after its owner moved away.
    fn reindex(&mut self, path: &str) {
        if let Some((id, _)) = self.paths.iter().find(|(_, p)| p.as_str() == path) {
            self.ids.insert(path.to_owned(), *id);
        }
    }
}

impl From<IndexMap<PageId, String>> for KeyMap {
    fn from(paths: IndexMap<PageId, String>) -> Self {
        let mut ids = HashMap::with_capacity(paths.len());
        for (id, path) in &paths {
            ids.entry(path.clone()).or_insert(*id);
        }
        Self { paths, ids }
    }
}

impl From<KeyMap> for IndexMap<PageId, String> {
    fn from(keys: KeyMap) -> Self {
        keys.paths
    }
}

impl<P: Into<String>> FromIterator<(PageId, P)> for KeyMap {
    fn from_iter<I: IntoIterator<Item = (PageId, P)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(id, path)| (id, path.into()))
            .collect::<IndexMap<_, _>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn keys() -> KeyMap {
        [
            (PageId(1), ""),
            (PageId(5), "about"),
            (PageId(6), "secret"),
            (PageId(404), "404"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_forward_lookup() {
        let keys = keys();

        assert_eq!(keys.path(PageId(5)), Some("about"));
        assert_eq!(keys.path(PageId(1)), Some(""));
        assert_eq!(keys.path(PageId(7)), None);
    }

    #[test]
    fn test_reverse_lookup() {
        let keys = keys();

        assert_eq!(keys.page_id("secret"), Some(PageId(6)));
        assert_eq!(keys.page_id(""), Some(PageId(1)));
        assert_eq!(keys.page_id("missing"), None);
    }

    #[test]
    fn test_duplicate_path_first_id_wins() {
        let keys: KeyMap = [(PageId(3), "news"), (PageId(9), "news")]
            .into_iter()
            .collect();

        assert_eq!(keys.page_id("news"), Some(PageId(3)));
    }

    #[test]
    fn test_insert_moves_path() {
        let mut keys = keys();

        keys.insert(PageId(5), "about-us");

        assert_eq!(keys.page_id("about"), None);
        assert_eq!(keys.page_id("about-us"), Some(PageId(5)));
        assert_eq!(keys.path(PageId(5)), Some("about-us"));
    }

    #[test]
    fn test_insert_hands_path_to_next_owner() {
        let mut keys: KeyMap = [(PageId(3), "news"), (PageId(9), "news")]
            .into_iter()
            .collect();

        keys.insert(PageId(3), "archive");

        assert_eq!(keys.page_id("news"), Some(PageId(9)));
    }

    #[test]
    fn test_insert_returns_path_to_earlier_id() {
        let mut keys: KeyMap = [(PageId(3), "news"), (PageId(9), "news")]
            .into_iter()
            .collect();

        keys.insert(PageId(3), "archive");
        keys.insert(PageId(3), "news");

        assert_eq!(keys.page_id("news"), Some(PageId(3)));
        assert_eq!(keys.page_id("archive"), None);
    }

    #[test]
    fn test_insert_new_id_does_not_take_owned_path() {
        let mut keys = keys();

        keys.insert(PageId(8), "about");

        assert_eq!(keys.page_id("about"), Some(PageId(5)));
        assert_eq!(keys.path(PageId(8)), Some("about"));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let json = r#"{"5":"about","1":"","6":"secret"}"#;

        let keys: KeyMap = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = keys.iter().map(|(id, _)| id.get()).collect();

        assert_eq!(ids, vec![5, 1, 6]);
        assert_eq!(serde_json::to_string(&keys).unwrap(), json);
    }
}
