//! Flat list of footer links.

use serde::Serialize;
use sitenav_graph::{NavigationType, PageId};

use crate::identifier::IdentifierResolver;
use crate::selected::SelectedPageIds;

/// One link of the footer navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub id: PageId,
    pub url: String,
    pub title: String,
    pub navigation_title: String,
    pub selected: bool,
}

/// Visible pages of the footer's top level, in stored order.
pub(crate) fn footer_links(
    resolver: &IdentifierResolver<'_>,
    selected: &SelectedPageIds,
) -> Vec<FooterLink> {
    let Some(bucket) = resolver.graph().bucket(NavigationType::Footer, PageId::ROOT) else {
        return Vec::new();
    };

    bucket
        .iter()
        .filter(|(_, page)| !page.hidden)
        .map(|(id, page)| FooterLink {
            id: *id,
            url: resolver.url_for(*id),
            title: page.title.clone(),
            navigation_title: page.navigation_title.clone(),
            selected: selected.contains(*id),
        })
        .collect()
}
