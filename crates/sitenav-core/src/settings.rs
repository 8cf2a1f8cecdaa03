//! Site-wide settings consumed by the engine.

use sitenav_graph::PageId;

/// Site settings that shape URLs and menus.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    /// Prefix every URL with `/<language>`.
    pub multi_language: bool,
    /// Render the meta navigation. When off, meta menus are empty.
    pub meta_navigation: bool,
    /// Page every failed lookup resolves to.
    pub not_found_page_id: PageId,
    /// Template used by [`RequestNavigation::render`](crate::RequestNavigation::render)
    /// callers that don't name one.
    pub default_template: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            multi_language: false,
            meta_navigation: true,
            not_found_page_id: PageId::NOT_FOUND,
            default_template: "navigation.html".to_owned(),
        }
    }
}
