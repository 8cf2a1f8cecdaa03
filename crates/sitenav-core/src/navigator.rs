//! Long-lived engine and per-request navigation state.

use std::collections::HashSet;
use std::sync::Arc;

use sitenav_graph::{BlockId, GraphProvider, NavigationType, PageId};

use crate::auth::AuthProvider;
use crate::blocks::{BlockLinkResolver, BlockQuery};
use crate::error::NavigationError;
use crate::footer::{FooterLink, footer_links};
use crate::identifier::IdentifierResolver;
use crate::menu::{MenuBuilder, MenuNode, MenuOptions, render_menu};
use crate::selected::{ExcludedPageIds, SelectedPageIds};
use crate::settings::SiteSettings;
use crate::slug::{ActionSlugs, Slugifier};
use crate::template::{JinjaTemplates, TemplateRenderer};

/// Navigation engine shared by all requests.
///
/// Holds the collaborators and settings. Per-request state lives in the
/// [`RequestNavigation`] returned by [`Navigator::request`].
///
/// # Example
///
/// ```ignore
/// let navigator = Navigator::new(provider).with_settings(settings);
/// let nav = navigator.request("en", &["about", "team"], &Anonymous);
/// let html = nav.render(NavigationType::Page, PageId::ROOT, &MenuOptions::default(), None)?;
/// ```
pub struct Navigator {
    provider: Arc<dyn GraphProvider>,
    templates: Arc<dyn TemplateRenderer>,
    slugs: Arc<dyn Slugifier>,
    settings: SiteSettings,
}

impl Navigator {
    /// Create an engine with built-in templates, default slugs and default settings.
    pub fn new(provider: impl GraphProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            templates: Arc::new(JinjaTemplates::new()),
            slugs: Arc::new(ActionSlugs::new()),
            settings: SiteSettings::default(),
        }
    }

    /// Use a different template renderer.
    #[must_use]
    pub fn with_templates(mut self, templates: impl TemplateRenderer + 'static) -> Self {
        self.templates = Arc::new(templates);
        self
    }

    /// Use a different action slugifier.
    #[must_use]
    pub fn with_slugifier(mut self, slugs: impl Slugifier + 'static) -> Self {
        self.slugs = Arc::new(slugs);
        self
    }

    /// Replace the site settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Site settings.
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Start navigation for one request.
    ///
    /// `segments` are the request path's segments after the language prefix.
    pub fn request<'n, S: AsRef<str>>(
        &'n self,
        language: &str,
        segments: &[S],
        auth: &'n dyn AuthProvider,
    ) -> RequestNavigation<'n> {
        let resolver = IdentifierResolver::new(self.provider.as_ref(), &self.settings, language);
        let selected = SelectedPageIds::from_segments(&resolver, segments);
        tracing::debug!(
            language,
            selected = ?selected.iter().collect::<Vec<_>>(),
            "Computed selected pages"
        );
        RequestNavigation {
            navigator: self,
            resolver,
            selected,
            excluded: ExcludedPageIds::new(),
            auth,
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Navigation state of one request.
///
/// Owns the request's selected and excluded pages; nothing outlives it.
pub struct RequestNavigation<'n> {
    navigator: &'n Navigator,
    resolver: IdentifierResolver<'n>,
    selected: SelectedPageIds,
    excluded: ExcludedPageIds,
    auth: &'n dyn AuthProvider,
}

impl<'n> RequestNavigation<'n> {
    /// Resolver for the request's language.
    pub fn resolver(&self) -> &IdentifierResolver<'n> {
        &self.resolver
    }

    /// Pages on the requested path.
    pub fn selected(&self) -> &SelectedPageIds {
        &self.selected
    }

    /// Pages excluded from every menu of this request.
    pub fn excluded(&self) -> &ExcludedPageIds {
        &self.excluded
    }

    /// Exclude pages from every menu rendered for the rest of the request.
    pub fn exclude_page_ids(&mut self, ids: impl IntoIterator<Item = PageId>) {
        self.excluded.extend(ids);
    }

    /// URL of a page in the request's language.
    pub fn url_for(&self, page_id: PageId) -> String {
        self.resolver.url_for(page_id)
    }

    /// Page owning a URL in the request's language.
    pub fn page_id_for(&self, url: &str) -> PageId {
        self.resolver.page_id_for(url)
    }

    /// Build the menu below `parent`.
    ///
    /// A meta menu is empty when meta navigation is disabled or the graph has
    /// no meta tree.
    pub fn menu(
        &self,
        ty: NavigationType,
        parent: PageId,
        options: &MenuOptions,
    ) -> Result<Vec<MenuNode>, NavigationError> {
        Ok(self.build_menu(ty, parent, options)?.unwrap_or_default())
    }

    /// Render the menu below `parent` with `template`, or the default
    /// template when `None`.
    pub fn render(
        &self,
        ty: NavigationType,
        parent: PageId,
        options: &MenuOptions,
        template: Option<&str>,
    ) -> Result<String, NavigationError> {
        let Some(nodes) = self.build_menu(ty, parent, options)? else {
            return Ok(String::new());
        };
        let template = template.unwrap_or(self.navigator.settings.default_template.as_str());
        render_menu(self.navigator.templates.as_ref(), template, nodes)
    }

    /// Visible footer links.
    pub fn footer_links(&self) -> Vec<FooterLink> {
        footer_links(&self.resolver, &self.selected)
    }

    /// URL of the page hosting a module block.
    pub fn block_url(&self, query: &BlockQuery<'_>) -> String {
        self.blocks().resolve(query)
    }

    /// URL of the page hosting the block with id `block_id`.
    pub fn block_url_by_id(&self, block_id: BlockId, language: Option<&str>) -> String {
        self.blocks().resolve_by_id(block_id, language)
    }

    fn blocks(&self) -> BlockLinkResolver<'_> {
        BlockLinkResolver::new(&self.resolver, self.navigator.slugs.as_ref())
    }

    /// `None` when the menu is a disabled meta menu.
    fn build_menu(
        &self,
        ty: NavigationType,
        parent: PageId,
        options: &MenuOptions,
    ) -> Result<Option<Vec<MenuNode>>, NavigationError> {
        if ty == NavigationType::Meta
            && (!self.navigator.settings.meta_navigation
                || !self.resolver.graph().has_type(NavigationType::Meta))
        {
            tracing::debug!("Meta navigation disabled or missing");
            return Ok(None);
        }

        let excluded: HashSet<PageId> = options
            .exclude
            .iter()
            .copied()
            .chain(self.excluded.iter())
            .collect();
        let builder = MenuBuilder::new(
            &self.resolver,
            &self.selected,
            excluded,
            self.auth.is_authenticated(),
            self.auth.groups(),
            options.max_depth,
        );
        builder.level(ty, parent, 1).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use sitenav_graph::{AuthData, MockGraphProvider, PageRecord};

    use super::*;
    use crate::auth::{Actor, Anonymous};
    use crate::error::TemplateError;
    use crate::menu::MenuEntry;

    /// Renders levels as `[id@depth(children)...]` and counts calls.
    #[derive(Default)]
    struct RecordingTemplates {
        calls: Mutex<Vec<String>>,
    }

    impl TemplateRenderer for Arc<RecordingTemplates> {
        fn render(&self, template: &str, navigation: &[MenuEntry]) -> Result<String, TemplateError> {
            self.calls
                .lock()
                .unwrap()
                .push(template.to_owned());
            let items: Vec<String> = navigation
                .iter()
                .map(|e| {
                    let mut item = format!("{}@{}", e.page_id, e.depth);
                    if e.selected {
                        item.push('*');
                    }
                    if let Some(children) = &e.children {
                        item.push_str(&format!("({children})"));
                    }
                    item
                })
                .collect();
            Ok(format!("[{}]", items.join(" ")))
        }
    }

    fn scenario_provider() -> MockGraphProvider {
        MockGraphProvider::new()
            .with_page(NavigationType::Page, PageId::ROOT, PageRecord::new(1, "Home"), "")
            .with_page(NavigationType::Page, PageId(1), PageRecord::new(5, "About"), "about")
            .with_page(
                NavigationType::Page,
                PageId(1),
                PageRecord {
                    hidden: true,
                    ..PageRecord::new(6, "Secret")
                },
                "secret",
            )
            .with_page(NavigationType::Page, PageId(5), PageRecord::new(7, "Team"), "about/team")
            .with_page(
                NavigationType::Page,
                PageId(1),
                PageRecord {
                    auth: Some(AuthData {
                        auth_required: true,
                        auth_groups: BTreeSet::from([4]),
                    }),
                    ..PageRecord::new(8, "Staff")
                },
                "staff",
            )
            .with_page(NavigationType::Footer, PageId::ROOT, PageRecord::new(9, "Sitemap"), "sitemap")
            .with_key(PageId::NOT_FOUND, "404")
    }

    fn navigator(templates: &Arc<RecordingTemplates>) -> Navigator {
        Navigator::new(scenario_provider()).with_templates(Arc::clone(templates))
    }

    #[test]
    fn test_render_root_menu() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let html = nav
            .render(NavigationType::Page, PageId::ROOT, &MenuOptions::default(), None)
            .unwrap();

        assert_eq!(html, "[1@1* 5@1([7@2])]");
        assert_eq!(
            *templates.calls.lock().unwrap(),
            vec!["navigation.html".to_owned(), "navigation.html".to_owned()]
        );
    }

    #[test]
    fn test_render_with_max_depth_and_template() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let nav = navigator.request("en", &["about", "team"], &Anonymous);

        let html = nav
            .render(
                NavigationType::Page,
                PageId::ROOT,
                &MenuOptions::default().max_depth(1),
                Some("menu.html"),
            )
            .unwrap();

        assert_eq!(html, "[1@1 5@1*]");
        assert_eq!(*templates.calls.lock().unwrap(), vec!["menu.html".to_owned()]);
    }

    #[test]
    fn test_auth_visibility_follows_actor() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let options = MenuOptions::default().max_depth(1);
        let visible = |auth: &dyn AuthProvider| {
            navigator
                .request::<&str>("en", &[], auth)
                .menu(NavigationType::Page, PageId::ROOT, &options)
                .unwrap()
                .iter()
                .any(|n| n.page_id == PageId(8))
        };

        assert!(!visible(&Anonymous));
        assert!(!visible(&Actor::new([1])));
        assert!(visible(&Actor::new([1, 4])));
    }

    #[test]
    fn test_excluded_pages_persist_for_request() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let mut nav = navigator.request::<&str>("en", &[], &Anonymous);

        nav.exclude_page_ids([PageId(7)]);
        let first = nav
            .render(
                NavigationType::Page,
                PageId::ROOT,
                &MenuOptions::default().exclude([PageId(1)]),
                None,
            )
            .unwrap();
        let second = nav
            .render(NavigationType::Page, PageId::ROOT, &MenuOptions::default(), None)
            .unwrap();

        assert_eq!(first, "[5@1([])]");
        assert_eq!(second, "[1@1* 5@1([])]");
    }

    #[test]
    fn test_new_request_starts_without_exclusions() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);

        let mut first = navigator.request::<&str>("en", &[], &Anonymous);
        first.exclude_page_ids([PageId(5)]);
        let second = navigator.request::<&str>("en", &[], &Anonymous);

        assert!(second.excluded().is_empty());
        let ids: Vec<_> = second
            .menu(NavigationType::Page, PageId::ROOT, &MenuOptions::default())
            .unwrap()
            .iter()
            .map(|n| n.page_id)
            .collect();
        assert_eq!(ids, vec![PageId(1), PageId(5)]);
    }

    #[test]
    fn test_meta_menu_disabled_renders_nothing() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = Navigator::new(
            scenario_provider().with_page(
                NavigationType::Meta,
                PageId::ROOT,
                PageRecord::new(40, "Contact"),
                "contact",
            ),
        )
        .with_templates(Arc::clone(&templates))
        .with_settings(SiteSettings {
            meta_navigation: false,
            ..SiteSettings::default()
        });
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let html = nav
            .render(NavigationType::Meta, PageId::ROOT, &MenuOptions::default(), None)
            .unwrap();

        assert_eq!(html, "");
        assert!(templates.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_meta_menu_without_meta_tree_renders_nothing() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let html = nav
            .render(NavigationType::Meta, PageId(77), &MenuOptions::default(), None)
            .unwrap();

        assert_eq!(html, "");
    }

    #[test]
    fn test_meta_menu_enabled() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = Navigator::new(
            scenario_provider().with_page(
                NavigationType::Meta,
                PageId::ROOT,
                PageRecord::new(40, "Contact"),
                "contact",
            ),
        )
        .with_templates(Arc::clone(&templates));
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let html = nav
            .render(NavigationType::Meta, PageId::ROOT, &MenuOptions::default(), None)
            .unwrap();

        assert_eq!(html, "[40@1]");
    }

    #[test]
    fn test_structural_errors_propagate() {
        let templates = Arc::new(RecordingTemplates::default());
        let navigator = navigator(&templates);
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let err = nav
            .render(NavigationType::Page, PageId(99), &MenuOptions::default(), None)
            .unwrap_err();

        assert!(matches!(err, NavigationError::MissingParent { .. }));
        assert!(templates.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_builtin_templates_render_html() {
        let navigator = Navigator::new(scenario_provider());
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        let html = nav
            .render(NavigationType::Page, PageId::ROOT, &MenuOptions::default(), None)
            .unwrap();

        assert!(html.contains(">About</a>"));
        assert!(html.contains(">Team</a>"));
        assert!(!html.contains("Secret"));
        assert!(!html.contains("Staff"));
    }

    #[test]
    fn test_footer_and_links() {
        let navigator = Navigator::new(scenario_provider());
        let nav = navigator.request("en", &["sitemap"], &Anonymous);

        let footer = nav.footer_links();

        assert_eq!(footer.len(), 1);
        assert!(footer[0].selected);
        assert_eq!(nav.url_for(PageId(7)), "/about/team");
        assert_eq!(nav.page_id_for("/about/team/"), PageId(7));
        assert_eq!(nav.url_for(PageId(123)), "/404");
    }

    #[test]
    fn test_block_urls() {
        let provider = scenario_provider().with_page(
            NavigationType::Page,
            PageId(1),
            PageRecord {
                extra_blocks: vec![sitenav_graph::BlockDescriptor {
                    block_id: 12,
                    module: "Faq".to_owned(),
                    action: None,
                    data: None,
                }],
                ..PageRecord::new(30, "Faq")
            },
            "faq",
        );
        let navigator = Navigator::new(provider);
        let nav = navigator.request::<&str>("en", &[], &Anonymous);

        assert_eq!(nav.block_url(&BlockQuery::new("Faq")), "/faq");
        assert_eq!(nav.block_url(&BlockQuery::new("Faq").action("category")), "/faq/category");
        assert_eq!(nav.block_url_by_id(12, None), "/faq");
        assert_eq!(nav.block_url_by_id(13, None), "/404");
    }
}
