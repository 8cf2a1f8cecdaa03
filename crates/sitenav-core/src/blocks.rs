//! Links to pages hosting module blocks.

use std::collections::BTreeMap;

use sitenav_graph::{BlockId, NavigationGraph, PageId};

use crate::identifier::IdentifierResolver;
use crate::slug::Slugifier;

/// Lookup of the page hosting a module.
#[derive(Clone, Debug, Default)]
pub struct BlockQuery<'q> {
    module: &'q str,
    action: Option<&'q str>,
    language: Option<&'q str>,
    data: Option<&'q BTreeMap<String, String>>,
}

impl<'q> BlockQuery<'q> {
    /// Look up the page hosting `module`.
    #[must_use]
    pub fn new(module: &'q str) -> Self {
        Self {
            module,
            ..Self::default()
        }
    }

    /// Look for a specific action. The action's slug is appended to the URL.
    #[must_use]
    pub fn action(mut self, action: &'q str) -> Self {
        self.action = Some(action);
        self
    }

    /// Resolve in another language than the request's.
    #[must_use]
    pub fn language(mut self, language: &'q str) -> Self {
        self.language = Some(language);
        self
    }

    /// Prefer blocks whose data contains every pair of `data`.
    #[must_use]
    pub fn data(mut self, data: &'q BTreeMap<String, String>) -> Self {
        self.data = Some(data);
        self
    }
}

/// Finds pages by the blocks embedded on them.
pub struct BlockLinkResolver<'a> {
    resolver: &'a IdentifierResolver<'a>,
    slugs: &'a dyn Slugifier,
}

impl<'a> BlockLinkResolver<'a> {
    pub fn new(resolver: &'a IdentifierResolver<'a>, slugs: &'a dyn Slugifier) -> Self {
        Self { resolver, slugs }
    }

    /// URL of the page hosting the queried module.
    ///
    /// A block with the exact action wins immediately. Otherwise the page of
    /// the best module-only block is used and the action slug appended.
    /// Falls back to the not-found URL.
    pub fn resolve(&self, query: &BlockQuery<'_>) -> String {
        let resolver = self.resolver_for(query.language);
        match find_block_page(resolver.graph(), query) {
            BlockMatch::Exact(page_id) => resolver.url_for(page_id),
            BlockMatch::Module(page_id) => {
                let url = resolver.url_for(page_id);
                match query.action {
                    Some(action) => {
                        let slug = self.slugs.action_slug(action, resolver.language());
                        format!("{}/{slug}", url.trim_end_matches('/'))
                    }
                    None => url,
                }
            }
            BlockMatch::NotFound => {
                tracing::debug!(module = query.module, action = ?query.action, "No page hosts block");
                resolver.not_found_url()
            }
        }
    }

    /// URL of the first page hosting the block with id `block_id`.
    pub fn resolve_by_id(&self, block_id: BlockId, language: Option<&str>) -> String {
        let resolver = self.resolver_for(language);
        resolver
            .graph()
            .entries()
            .find(|entry| {
                entry
                    .page
                    .extra_blocks
                    .iter()
                    .any(|block| block.block_id == block_id)
            })
            .map_or_else(
                || resolver.not_found_url(),
                |entry| resolver.url_for(entry.page.page_id),
            )
    }

    fn resolver_for(&self, language: Option<&str>) -> IdentifierResolver<'a> {
        match language {
            Some(language) => self.resolver.in_language(language),
            None => self.resolver.clone(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BlockMatch {
    Exact(PageId),
    Module(PageId),
    NotFound,
}

/// Scan visible pages for the queried block.
///
/// Among module-only blocks, a block whose data matches the query (data
/// containing the filter, or neither side having data) beats any other
/// module block; later data matches replace earlier ones. Blocks with data
/// that contradicts the filter are skipped.
fn find_block_page(graph: &NavigationGraph, query: &BlockQuery<'_>) -> BlockMatch {
    let mut candidate = None;
    let mut data_match = false;

    for entry in graph.entries() {
        let page = entry.page;
        if page.hidden {
            continue;
        }
        for block in &page.extra_blocks {
            if block.module != query.module {
                continue;
            }
            match (block.action.as_deref(), query.action) {
                (Some(action), Some(wanted)) if action == wanted => {
                    if let Some(filter) = query.data
                        && block.data.is_some()
                        && !block.data_contains(filter)
                    {
                        continue;
                    }
                    return BlockMatch::Exact(page.page_id);
                }
                (None, _) => match (&block.data, query.data) {
                    (Some(_), Some(filter)) => {
                        if !block.data_contains(filter) {
                            continue;
                        }
                        candidate = Some(page.page_id);
                        data_match = true;
                    }
                    (None, None) => {
                        candidate = Some(page.page_id);
                        data_match = true;
                    }
                    _ => {
                        if !data_match {
                            candidate = Some(page.page_id);
                        }
                    }
                },
                _ => {}
            }
        }
    }

    candidate.map_or(BlockMatch::NotFound, BlockMatch::Module)
}
