//! Page id and URL resolution.
//!
//! [`IdentifierResolver`] maps page ids to URLs and back for one language.
//! Lookups never fail: unknown ids and URLs resolve to the site's not-found
//! page.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use sitenav_graph::{GraphProvider, KeyMap, NavigationGraph, NavigationType, PageId, PageRecord};

use crate::settings::SiteSettings;

/// A page found in the graph, with its position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Navigation type holding the page.
    pub navigation_type: NavigationType,
    /// Id of the bucket holding the page.
    pub parent_id: PageId,
    /// The page record.
    #[serde(flatten)]
    pub page: PageRecord,
}

/// Bidirectional page id / URL mapping for one language.
///
/// Holds the language's graph and key snapshots for its whole lifetime, so
/// every lookup made through one resolver sees the same data.
#[derive(Clone)]
pub struct IdentifierResolver<'a> {
    provider: &'a dyn GraphProvider,
    settings: &'a SiteSettings,
    language: String,
    graph: Arc<NavigationGraph>,
    keys: Arc<KeyMap>,
}

impl<'a> IdentifierResolver<'a> {
    /// Create a resolver for `language`.
    pub fn new(
        provider: &'a dyn GraphProvider,
        settings: &'a SiteSettings,
        language: impl Into<String>,
    ) -> Self {
        let language = language.into();
        Self {
            graph: provider.navigation(&language),
            keys: provider.keys(&language),
            provider,
            settings,
            language,
        }
    }

    /// Resolver for another language sharing the same provider and settings.
    #[must_use]
    pub fn in_language(&self, language: &str) -> Self {
        if language == self.language {
            return self.clone();
        }
        Self::new(self.provider, self.settings, language)
    }

    /// Language this resolver works in.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Site settings.
    pub fn settings(&self) -> &'a SiteSettings {
        self.settings
    }

    /// Navigation graph of this language.
    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    /// Page id to URL path mapping of this language.
    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    /// URL of a page.
    ///
    /// Unknown pages get the URL of the not-found page. When the not-found
    /// page has no URL either, the bare language prefix is returned.
    pub fn url_for(&self, page_id: PageId) -> String {
        let mut url = self.prefix();
        match self
            .keys
            .path(page_id)
            .or_else(|| self.keys.path(self.settings.not_found_page_id))
        {
            Some(path) => url.push_str(path),
            None => tracing::warn!(
                page_id = %page_id,
                language = %self.language,
                "No URL for page or for the not-found page"
            ),
        }
        url_decode(&url)
    }

    /// URL of the not-found page.
    pub fn not_found_url(&self) -> String {
        self.url_for(self.settings.not_found_page_id)
    }

    /// Page owning a URL, or the not-found page id.
    pub fn page_id_for(&self, url: &str) -> PageId {
        self.lookup_page_id(url)
            .unwrap_or(self.settings.not_found_page_id)
    }

    /// Page owning a URL. Leading and trailing slashes are ignored.
    pub fn lookup_page_id(&self, url: &str) -> Option<PageId> {
        self.keys.page_id(url.trim_matches('/'))
    }

    /// First child of a page, looking for its bucket in every navigation type.
    pub fn first_child_of(&self, page_id: PageId) -> Option<PageId> {
        self.graph
            .types()
            .find_map(|(_, tree)| tree.get(&page_id)?.keys().next().copied())
    }

    /// Locate a page in the graph. The first match in stored order wins.
    pub fn info_for(&self, page_id: PageId) -> Option<PageInfo> {
        self.graph
            .entries()
            .find(|entry| entry.page.page_id == page_id)
            .map(|entry| PageInfo {
                navigation_type: entry.navigation_type,
                parent_id: entry.parent_id,
                page: entry.page.clone(),
            })
    }

    fn prefix(&self) -> String {
        if self.settings.multi_language {
            format!("/{}/", self.language)
        } else {
            "/".to_owned()
        }
    }
}

impl std::fmt::Debug for IdentifierResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierResolver")
            .field("language", &self.language)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Decode a URL the way HTML forms encode it: `+` is a space.
fn url_decode(url: &str) -> String {
    let url = url.replace('+', " ");
    percent_decode_str(&url).decode_utf8_lossy().into_owned()
}
