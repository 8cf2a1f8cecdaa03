//! Navigation graph model and provider abstraction for sitenav.
//!
//! This crate provides the read-only data the navigation engine works on:
//!
//! - [`NavigationGraph`]: `type -> parent id -> page id -> PageRecord`
//! - [`KeyMap`]: page id to URL path, with reverse lookup
//! - [`GraphProvider`]: per-language source of both snapshots
//! - [`decode_graph`]: the boundary where stored page data is decoded once
//! - [`MockGraphProvider`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```
//! use sitenav_graph::{KeyMap, NavigationGraph, NavigationType, PageId, PageRecord};
//!
//! let mut graph = NavigationGraph::new();
//! graph.insert(NavigationType::Page, PageId::ROOT, PageRecord::new(1, "Home"));
//!
//! let keys: KeyMap = [(PageId::HOME, "")].into_iter().collect();
//! assert_eq!(keys.page_id(""), Some(PageId::HOME));
//! ```

mod error;
mod graph;
mod keys;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod provider;
mod snapshot;

pub use error::{GraphError, GraphErrorKind};
pub use graph::{
    Bucket, GraphEntry, NavigationGraph, NavigationType, TypeTree, UnknownNavigationType,
};
pub use keys::KeyMap;
#[cfg(feature = "mock")]
pub use mock::MockGraphProvider;
pub use page::{AuthData, BlockDescriptor, BlockId, GroupId, PageId, PageRecord, TreeType};
pub use provider::GraphProvider;
pub use snapshot::{MalformedAuthPolicy, StoredGraph, StoredPage, decode_graph};
