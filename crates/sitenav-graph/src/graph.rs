//! Navigation graph: navigation types, parent buckets and pages.
//!
//! The graph is a three-level ordered mapping:
//!
//! ```text
//! NavigationType -> parent PageId -> PageId -> PageRecord
//! ```
//!
//! A page with children owns the bucket keyed by its own id. Every level
//! preserves insertion order, which callers rely on for first-match scans.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::page::{PageId, PageRecord};

/// Independent top-level trees of a site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
    /// Main site tree.
    Page,
    /// Footer links.
    Footer,
    /// Meta navigation (top bar links).
    Meta,
}

impl NavigationType {
    /// All navigation types.
    pub const ALL: [Self; 3] = [Self::Page, Self::Footer, Self::Meta];

    /// Lowercase name as used in stored snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Footer => "footer",
            Self::Meta => "meta",
        }
    }

    /// Type used for the subtrees below this type's top level.
    ///
    /// Footer and meta entries are ordinary pages, so their children live in
    /// the `page` tree.
    #[must_use]
    pub fn subtree_type(self) -> Self {
        match self {
            Self::Page | Self::Footer | Self::Meta => Self::Page,
        }
    }
}

impl fmt::Display for NavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown navigation type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownNavigationType(pub String);

impl fmt::Display for UnknownNavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This type ({}) isn't a valid navigation type. Possible values are: page, footer, meta.",
            self.0
        )
    }
}

impl std::error::Error for UnknownNavigationType {}

impl FromStr for NavigationType {
    type Err = UnknownNavigationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "footer" => Ok(Self::Footer),
            "meta" => Ok(Self::Meta),
            other => Err(UnknownNavigationType(other.to_owned())),
        }
    }
}

/// Pages sharing one parent, keyed by page id.
pub type Bucket = IndexMap<PageId, PageRecord>;

/// All buckets of one navigation type, keyed by parent id.
pub type TypeTree = IndexMap<PageId, Bucket>;

/// A page located in the graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphEntry<'a> {
    /// Navigation type holding the page.
    pub navigation_type: NavigationType,
    /// Id of the bucket holding the page.
    pub parent_id: PageId,
    /// The page itself.
    pub page: &'a PageRecord,
}

/// Read-only snapshot of a site's page hierarchy for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationGraph {
    types: IndexMap<NavigationType, TypeTree>,
}

impl NavigationGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the graph has any tree for `ty`.
    #[must_use]
    pub fn has_type(&self, ty: NavigationType) -> bool {
        self.types.contains_key(&ty)
    }

    /// Get all buckets of a navigation type.
    #[must_use]
    pub fn tree(&self, ty: NavigationType) -> Option<&TypeTree> {
        self.types.get(&ty)
    }

    /// Get the bucket of children of `parent` within `ty`.
    #[must_use]
    pub fn bucket(&self, ty: NavigationType, parent: PageId) -> Option<&Bucket> {
        self.types.get(&ty)?.get(&parent)
    }

    /// Iterate navigation types in stored order.
    pub fn types(&self) -> impl Iterator<Item = (NavigationType, &TypeTree)> {
        self.types.iter().map(|(ty, tree)| (*ty, tree))
    }

    /// Iterate every page of every bucket of every type, in stored order.
    pub fn entries(&self) -> impl Iterator<Item = GraphEntry<'_>> {
        self.types.iter().flat_map(|(ty, tree)| {
            tree.iter().flat_map(move |(parent, bucket)| {
                bucket.values().map(move |page| GraphEntry {
                    navigation_type: *ty,
                    parent_id: *parent,
                    page,
                })
            })
        })
    }

    /// Add a page to the bucket of `parent` within `ty`.
    ///
    /// Creates the type and bucket when missing. A page with the same id in
    /// the same bucket is replaced in place, keeping its position.
    pub fn insert(&mut self, ty: NavigationType, parent: PageId, page: PageRecord) {
        self.types
            .entry(ty)
            .or_default()
            .entry(parent)
            .or_default()
            .insert(page.page_id, page);
    }

    /// Register an empty bucket for `parent` within `ty`.
    pub fn ensure_bucket(&mut self, ty: NavigationType, parent: PageId) {
        self.types.entry(ty).or_default().entry(parent).or_default();
    }

    /// Total number of pages over all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types
            .values()
            .flat_map(IndexMap::values)
            .map(IndexMap::len)
            .sum()
    }

    /// True when the graph holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
