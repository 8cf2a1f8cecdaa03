//! Navigation resolution engine.
//!
//! Turns a site's page graph into menus and links for one request:
//!
//! - [`IdentifierResolver`]: page id to URL and back, with not-found fallback
//! - [`SelectedPageIds`]: pages on the requested path
//! - [`RequestNavigation::render`]: filtered, annotated menu trees rendered
//!   through a [`TemplateRenderer`]
//! - [`BlockLinkResolver`]: URLs of pages hosting module blocks
//! - [`RequestNavigation::footer_links`]: flat footer link list
//!
//! The graph and key snapshots come from a
//! [`GraphProvider`](sitenav_graph::GraphProvider) and are only read. All
//! per-request state lives in [`RequestNavigation`].
//!
//! # Example
//!
//! ```
//! use sitenav_core::{Anonymous, MenuOptions, Navigator};
//! use sitenav_graph::{MockGraphProvider, NavigationType, PageId, PageRecord};
//!
//! let provider = MockGraphProvider::new()
//!     .with_page(NavigationType::Page, PageId::ROOT, PageRecord::new(1, "Home"), "")
//!     .with_page(NavigationType::Page, PageId::HOME, PageRecord::new(5, "About"), "about");
//!
//! let navigator = Navigator::new(provider);
//! let nav = navigator.request("en", &["about"], &Anonymous);
//!
//! let menu = nav.menu(NavigationType::Page, PageId::ROOT, &MenuOptions::default()).unwrap();
//! assert_eq!(menu.len(), 2);
//! assert!(menu[1].selected);
//! assert_eq!(nav.url_for(PageId(5)), "/about");
//! ```

mod auth;
mod blocks;
mod error;
mod footer;
mod identifier;
mod menu;
mod navigator;
mod selected;
mod settings;
mod slug;
mod template;

pub use auth::{Actor, Anonymous, AuthProvider};
pub use blocks::{BlockLinkResolver, BlockQuery};
pub use error::{NavigationError, TemplateError};
pub use footer::FooterLink;
pub use identifier::{IdentifierResolver, PageInfo};
pub use menu::{MenuEntry, MenuNode, MenuOptions};
pub use navigator::{Navigator, RequestNavigation};
pub use selected::{ExcludedPageIds, SelectedPageIds, path_segments};
pub use settings::SiteSettings;
pub use slug::{ActionSlugs, Slugifier};
pub use template::{JinjaTemplates, TemplateRenderer};
