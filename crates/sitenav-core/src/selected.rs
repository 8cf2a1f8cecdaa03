//! Request-scoped page id sets: the selected path and excluded pages.

use indexmap::IndexSet;
use sitenav_graph::PageId;

use crate::identifier::IdentifierResolver;

/// Pages on the path of the requested URL.
///
/// For `/about/team/lead` this holds the pages behind `about/team/lead`,
/// `about/team` and `about`, deepest first, skipping prefixes without a
/// page. An empty path selects the home page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedPageIds {
    ids: IndexSet<PageId>,
}

impl SelectedPageIds {
    /// Compute the selected pages for the given path segments.
    pub fn from_segments<S: AsRef<str>>(resolver: &IdentifierResolver<'_>, segments: &[S]) -> Self {
        if segments.is_empty() {
            return std::iter::once(PageId::HOME).collect();
        }

        let mut ids = IndexSet::with_capacity(segments.len());
        for end in (1..=segments.len()).rev() {
            let path = segments[..end]
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("/");
            if let Some(id) = resolver.lookup_page_id(&path) {
                ids.insert(id);
            }
        }
        Self { ids }
    }

    /// Check whether a page is on the selected path.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.ids.contains(&page_id)
    }

    /// Iterate selected ids, deepest first.
    pub fn iter(&self) -> impl Iterator<Item = PageId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no page is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<PageId> for SelectedPageIds {
    fn from_iter<I: IntoIterator<Item = PageId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Pages hidden from every menu rendered during one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExcludedPageIds {
    ids: IndexSet<PageId>,
}

impl ExcludedPageIds {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add pages to the set.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = PageId>) {
        self.ids.extend(ids);
    }

    /// Check whether a page is excluded.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.ids.contains(&page_id)
    }

    /// Iterate excluded ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PageId> + '_ {
        self.ids.iter().copied()
    }

    /// True when nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split a URL path into its non-empty segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
