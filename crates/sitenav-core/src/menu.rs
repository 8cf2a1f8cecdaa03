//! Menu tree building and rendering.
//!
//! Menus are built in two passes. [`MenuBuilder`] walks the shared graph
//! snapshot and produces an owned, filtered and annotated [`MenuNode`] tree;
//! the snapshot itself is only ever borrowed. [`render_menu`] then renders
//! that tree bottom-up, handing each level to the [`TemplateRenderer`]
//! with its nested levels already rendered.
//!
//! # Home merge
//!
//! The home page (id 1) holds the site's first level of pages. When a level
//! contains the home page, the pages of the home bucket are appended to that
//! level so they render next to home, at the same depth. Home itself stays a
//! leaf.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use sitenav_graph::{GroupId, NavigationType, PageId, PageRecord, TypeTree};

use crate::error::NavigationError;
use crate::identifier::IdentifierResolver;
use crate::selected::SelectedPageIds;
use crate::template::TemplateRenderer;

/// Options of one menu build.
#[derive(Clone, Debug, Default)]
pub struct MenuOptions {
    /// Deepest level to include, counting the requested level as 1.
    /// Unlimited when `None` or 0.
    pub max_depth: Option<usize>,
    /// Pages to leave out, on top of the request's excluded pages.
    pub exclude: Vec<PageId>,
}

impl MenuOptions {
    /// Limit the menu to `depth` levels.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Leave the given pages out of the menu.
    #[must_use]
    pub fn exclude(mut self, ids: impl IntoIterator<Item = PageId>) -> Self {
        self.exclude.extend(ids);
        self
    }
}

/// A visible menu item with its nested level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    /// Page id.
    pub page_id: PageId,
    /// Id of the level's parent.
    pub parent_id: PageId,
    /// Page title.
    pub title: String,
    /// Title shown in menus.
    pub navigation_title: String,
    /// Link target, after redirects.
    pub link: String,
    /// Whether the page is on the selected path.
    pub selected: bool,
    /// Whether the link is marked `rel="nofollow"`.
    pub nofollow: bool,
    /// Level of the item, starting at 1.
    pub depth: usize,
    /// Nested level. `None` when the page has no children bucket, is the
    /// home page, or sits at the depth limit.
    pub children: Option<Vec<MenuNode>>,
}

/// A menu item as handed to templates.
///
/// Same as [`MenuNode`] with the nested level already rendered to markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub page_id: PageId,
    pub parent_id: PageId,
    pub title: String,
    pub navigation_title: String,
    pub link: String,
    pub selected: bool,
    pub nofollow: bool,
    pub depth: usize,
    /// Rendered nested level.
    pub children: Option<String>,
}

/// Builds filtered menu trees for one request.
pub(crate) struct MenuBuilder<'r> {
    resolver: &'r IdentifierResolver<'r>,
    selected: &'r SelectedPageIds,
    excluded: HashSet<PageId>,
    authenticated: bool,
    groups: &'r BTreeSet<GroupId>,
    max_depth: Option<usize>,
}

impl<'r> MenuBuilder<'r> {
    pub(crate) fn new(
        resolver: &'r IdentifierResolver<'r>,
        selected: &'r SelectedPageIds,
        excluded: HashSet<PageId>,
        authenticated: bool,
        groups: &'r BTreeSet<GroupId>,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            resolver,
            selected,
            excluded,
            authenticated,
            groups,
            max_depth,
        }
    }

    /// Build the level below `parent` and everything under it.
    pub(crate) fn level(
        &self,
        ty: NavigationType,
        parent: PageId,
        depth: usize,
    ) -> Result<Vec<MenuNode>, NavigationError> {
        let graph = self.resolver.graph();
        let tree = graph.tree(ty).ok_or(NavigationError::UnknownType(ty))?;
        if !tree.contains_key(&parent) {
            return Err(NavigationError::MissingParent { ty, parent });
        }

        let pages = merge_home(tree, parent);
        let subtree = ty.subtree_type();
        let mut nodes = Vec::with_capacity(pages.len());

        for page in pages {
            if !self.is_visible(page) {
                continue;
            }

            let children = if page.page_id.is_home()
                || graph.bucket(subtree, page.page_id).is_none()
            {
                None
            } else if self.max_depth.is_some_and(|max| max > 0 && depth + 1 > max) {
                tracing::debug!(page_id = %page.page_id, depth, "Depth limit reached");
                None
            } else {
                Some(self.level(subtree, page.page_id, depth + 1)?)
            };

            nodes.push(MenuNode {
                page_id: page.page_id,
                parent_id: parent,
                title: page.title.clone(),
                navigation_title: page.navigation_title.clone(),
                link: self.link(page),
                selected: self.selected.contains(page.page_id),
                nofollow: page.no_follow,
                depth,
                children,
            });
        }

        Ok(nodes)
    }

    fn is_visible(&self, page: &PageRecord) -> bool {
        if page.is_menu_hidden() {
            return false;
        }
        if let Some(auth) = &page.auth
            && !auth.permits(self.authenticated, self.groups)
        {
            return false;
        }
        !self.excluded.contains(&page.page_id)
    }

    /// Link target: external redirect, then internal redirect, then the page.
    fn link(&self, page: &PageRecord) -> String {
        if let Some(url) = page.redirect_url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_owned();
        }
        self.resolver
            .url_for(page.redirect_page_id.unwrap_or(page.page_id))
    }
}

/// Pages of the level below `parent`, with the home bucket merged in.
fn merge_home(tree: &TypeTree, parent: PageId) -> Vec<&PageRecord> {
    let Some(bucket) = tree.get(&parent) else {
        return Vec::new();
    };
    let mut pages: Vec<&PageRecord> = bucket.values().collect();

    if bucket.values().any(|page| page.page_id.is_home())
        && let Some(home) = tree.get(&PageId::HOME)
        && parent != PageId::HOME
    {
        tracing::debug!(parent = %parent, merged = home.len(), "Merging home children");
        pages.extend(
            home.values()
                .filter(|page| !bucket.contains_key(&page.page_id)),
        );
    }

    pages
}

/// Render a menu tree bottom-up with `template`.
pub(crate) fn render_menu(
    templates: &dyn TemplateRenderer,
    template: &str,
    nodes: Vec<MenuNode>,
) -> Result<String, NavigationError> {
    let entries = nodes
        .into_iter()
        .map(|node| {
            let children = node
                .children
                .map(|nested| render_menu(templates, template, nested))
                .transpose()?;
            Ok(MenuEntry {
                page_id: node.page_id,
                parent_id: node.parent_id,
                title: node.title,
                navigation_title: node.navigation_title,
                link: node.link,
                selected: node.selected,
                nofollow: node.nofollow,
                depth: node.depth,
                children,
            })
        })
        .collect::<Result<Vec<_>, NavigationError>>()?;

    Ok(templates.render(template, &entries)?)
}
