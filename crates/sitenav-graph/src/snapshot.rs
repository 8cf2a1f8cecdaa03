//! Stored snapshot format and its decoding boundary.
//!
//! The external cache builder writes pages with their auth requirements as
//! an opaque `data` string. This module decodes that string exactly once,
//! when a snapshot is loaded, so nothing downstream ever deserializes page
//! data again.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{GraphError, GraphErrorKind};
use crate::graph::{NavigationGraph, NavigationType};
use crate::page::{AuthData, BlockDescriptor, PageId, PageRecord, TreeType};

/// What to do with a page whose stored auth blob cannot be decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedAuthPolicy {
    /// Treat the page as public.
    #[default]
    FailOpen,
    /// Treat the page as visible to authenticated actors only.
    FailClosed,
}

/// Page record as written by the cache builder.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoredPage {
    pub page_id: PageId,
    pub title: String,
    pub navigation_title: String,
    pub hidden: bool,
    pub tree_type: TreeType,
    pub no_follow: bool,
    pub redirect_page_id: Option<PageId>,
    pub redirect_url: Option<String>,
    /// Serialized page settings, including auth requirements.
    pub data: Option<String>,
    pub extra_blocks: Vec<BlockDescriptor>,
}

/// Navigation graph as written by the cache builder.
pub type StoredGraph = IndexMap<NavigationType, IndexMap<PageId, IndexMap<PageId, StoredPage>>>;

impl StoredPage {
    /// Decode into a [`PageRecord`].
    ///
    /// # Arguments
    ///
    /// * `language` - Snapshot language, for log context
    /// * `policy` - Handling of undecodable auth data
    #[must_use]
    pub fn decode(self, language: &str, policy: MalformedAuthPolicy) -> PageRecord {
        let auth = decode_auth(self.page_id, self.data.as_deref(), language, policy);
        PageRecord {
            page_id: self.page_id,
            title: self.title,
            navigation_title: self.navigation_title,
            hidden: self.hidden,
            tree_type: self.tree_type,
            no_follow: self.no_follow,
            redirect_page_id: self.redirect_page_id,
            redirect_url: self.redirect_url.filter(|url| !url.is_empty()),
            auth,
            extra_blocks: self.extra_blocks,
        }
    }
}

/// Decode the auth requirements from a stored settings blob.
fn decode_auth(
    page_id: PageId,
    blob: Option<&str>,
    language: &str,
    policy: MalformedAuthPolicy,
) -> Option<AuthData> {
    let blob = blob.map(str::trim).filter(|b| !b.is_empty())?;
    match serde_json::from_str::<AuthData>(blob) {
        Ok(auth) => Some(auth),
        Err(e) => {
            tracing::warn!(
                page_id = %page_id,
                language,
                error = %e,
                policy = ?policy,
                "Failed to decode page auth data"
            );
            match policy {
                MalformedAuthPolicy::FailOpen => None,
                MalformedAuthPolicy::FailClosed => Some(AuthData {
                    auth_required: true,
                    auth_groups: std::collections::BTreeSet::new(),
                }),
            }
        }
    }
}

/// Decode a stored graph into a [`NavigationGraph`].
///
/// Empty buckets are kept: a parent bucket that exists but holds no pages is
/// still a valid render target.
///
/// # Errors
///
/// Returns [`GraphErrorKind::InvalidData`] when a page is stored under a key
/// different from its own id.
pub fn decode_graph(
    stored: StoredGraph,
    language: &str,
    policy: MalformedAuthPolicy,
) -> Result<NavigationGraph, GraphError> {
    let mut graph = NavigationGraph::new();
    for (ty, tree) in stored {
        for (parent, bucket) in tree {
            graph.ensure_bucket(ty, parent);
            for (key, page) in bucket {
                if key != page.page_id {
                    return Err(GraphError::new(GraphErrorKind::InvalidData)
                        .with_language(language)
                        .with_message(format!(
                            "page {} stored under key {key} in {ty} bucket {parent}",
                            page.page_id
                        )));
                }
                graph.insert(ty, parent, page.decode(language, policy));
            }
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn stored(json: &str) -> StoredPage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_plain_page() {
        let page = stored(
            r#"{"page_id": 5, "title": "About", "navigation_title": "About us", "no_follow": true}"#,
        )
        .decode("en", MalformedAuthPolicy::FailOpen);

        assert_eq!(page.page_id, PageId(5));
        assert_eq!(page.navigation_title, "About us");
        assert!(page.no_follow);
        assert!(page.auth.is_none());
        assert_eq!(page.tree_type, TreeType::Normal);
    }

    #[test]
    fn test_decode_auth_blob() {
        let page = stored(
            r#"{"page_id": 7, "data": "{\"auth_required\": true, \"auth_groups\": [2, 3], \"image\": \"x.png\"}"}"#,
        )
        .decode("en", MalformedAuthPolicy::FailOpen);

        assert_eq!(
            page.auth,
            Some(AuthData {
                auth_required: true,
                auth_groups: BTreeSet::from([2, 3]),
            })
        );
    }

    #[test]
    fn test_malformed_auth_fails_open() {
        let page = stored(r#"{"page_id": 7, "data": "a:1:{s:13:\"auth_required\";b:1;}"}"#)
            .decode("en", MalformedAuthPolicy::FailOpen);

        assert!(page.auth.is_none());
    }

    #[test]
    fn test_malformed_auth_fails_closed() {
        let page = stored(r#"{"page_id": 7, "data": "not json"}"#)
            .decode("en", MalformedAuthPolicy::FailClosed);

        let auth = page.auth.unwrap();
        assert!(auth.auth_required);
        assert!(auth.auth_groups.is_empty());
    }

    #[test]
    fn test_empty_redirect_url_is_absent() {
        let page = stored(r#"{"page_id": 8, "redirect_url": ""}"#)
            .decode("en", MalformedAuthPolicy::FailOpen);

        assert_eq!(page.redirect_url, None);
    }

    #[test]
    fn test_decode_graph_keeps_empty_buckets() {
        let json = r#"{"page": {"0": {"1": {"page_id": 1}}, "1": {}}}"#;
        let stored: StoredGraph = serde_json::from_str(json).unwrap();

        let graph = decode_graph(stored, "en", MalformedAuthPolicy::FailOpen).unwrap();

        assert!(graph.bucket(NavigationType::Page, PageId(1)).unwrap().is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_decode_graph_rejects_mismatched_key() {
        let json = r#"{"page": {"0": {"2": {"page_id": 1}}}}"#;
        let stored: StoredGraph = serde_json::from_str(json).unwrap();

        let err = decode_graph(stored, "nl", MalformedAuthPolicy::FailOpen).unwrap_err();

        assert_eq!(err.kind, GraphErrorKind::InvalidData);
        assert!(err.to_string().contains("language: nl"));
    }
}
