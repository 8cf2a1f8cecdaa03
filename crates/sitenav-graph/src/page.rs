//! Page records stored in a navigation graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a page, unique within a parent bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    /// Parent id of the top-level bucket of every navigation type.
    pub const ROOT: Self = Self(0);
    /// The home page. Its children are merged into the bucket that holds it.
    pub const HOME: Self = Self(1);
    /// Conventional id of the "page not found" page.
    pub const NOT_FOUND: Self = Self(404);

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// True for [`PageId::HOME`].
    #[must_use]
    pub fn is_home(self) -> bool {
        self == Self::HOME
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile group identifier used by page authorization.
pub type GroupId = u32;

/// Identifier of an extra block.
pub type BlockId = u32;

/// Kind of tree entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeType {
    /// Regular page.
    #[default]
    #[serde(rename = "page", alias = "normal")]
    Normal,
    /// Page that only hosts a module action; never shown in menus.
    DirectAction,
    /// Any other stored tree type.
    #[serde(other)]
    Other,
}

/// Authorization requirements of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Visitors must be logged in.
    #[serde(default)]
    pub auth_required: bool,
    /// Visitors must belong to at least one of these groups (when non-empty).
    #[serde(default)]
    pub auth_groups: BTreeSet<GroupId>,
}

impl AuthData {
    /// Check whether an actor may see a page with these requirements.
    ///
    /// # Arguments
    ///
    /// * `authenticated` - Whether the actor is logged in
    /// * `groups` - Groups the actor belongs to
    #[must_use]
    pub fn permits(&self, authenticated: bool, groups: &BTreeSet<GroupId>) -> bool {
        if !self.auth_required {
            return true;
        }
        if !authenticated {
            return false;
        }
        self.auth_groups.is_empty() || !self.auth_groups.is_disjoint(groups)
    }
}

/// A content block embedded on a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Stable block id.
    #[serde(rename = "id")]
    pub block_id: BlockId,
    /// Module that owns the block.
    pub module: String,
    /// Module action, `None` for the module's main entry point.
    #[serde(default)]
    pub action: Option<String>,
    /// Block configuration used to tell instances of one module apart.
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

impl BlockDescriptor {
    /// Check whether every pair of `filter` is present in the block data.
    ///
    /// A block without data contains nothing, so only an empty filter matches it.
    #[must_use]
    pub fn data_contains(&self, filter: &BTreeMap<String, String>) -> bool {
        let Some(data) = &self.data else {
            return filter.is_empty();
        };
        filter
            .iter()
            .all(|(key, value)| data.get(key).is_some_and(|v| v == value))
    }
}

/// One node in the navigation graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// Page id.
    pub page_id: PageId,
    /// Page title.
    pub title: String,
    /// Title shown in menus.
    pub navigation_title: String,
    /// Hidden pages never show up in menus.
    pub hidden: bool,
    /// Tree entry kind.
    pub tree_type: TreeType,
    /// Render menu links with `rel="nofollow"`.
    pub no_follow: bool,
    /// Link to another page instead of this one.
    pub redirect_page_id: Option<PageId>,
    /// Link to an external URL. Wins over `redirect_page_id`.
    pub redirect_url: Option<String>,
    /// Decoded authorization requirements.
    pub auth: Option<AuthData>,
    /// Blocks embedded on the page, in display order.
    pub extra_blocks: Vec<BlockDescriptor>,
}

impl PageRecord {
    /// Create a visible, regular page with the given id and title.
    #[must_use]
    pub fn new(page_id: impl Into<PageId>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            page_id: page_id.into(),
            navigation_title: title.clone(),
            title,
            ..Self::default()
        }
    }

    /// True when the page must never appear in a menu regardless of the actor.
    #[must_use]
    pub fn is_menu_hidden(&self) -> bool {
        self.hidden || self.tree_type == TreeType::DirectAction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(ids: &[GroupId]) -> BTreeSet<GroupId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_page_id_constants() {
        assert_eq!(PageId::ROOT.get(), 0);
        assert!(PageId::HOME.is_home());
        assert_eq!(PageId::NOT_FOUND.to_string(), "404");
    }

    #[test]
    fn test_tree_type_deserializes_known_and_unknown_values() {
        let types: Vec<TreeType> =
            serde_json::from_str(r#"["page", "normal", "direct_action", "footer"]"#).unwrap();

        assert_eq!(
            types,
            vec![
                TreeType::Normal,
                TreeType::Normal,
                TreeType::DirectAction,
                TreeType::Other
            ]
        );
    }

    #[test]
    fn test_auth_not_required_permits_anonymous() {
        let auth = AuthData::default();

        assert!(auth.permits(false, &groups(&[])));
    }

    #[test]
    fn test_auth_required_rejects_anonymous() {
        let auth = AuthData {
            auth_required: true,
            auth_groups: BTreeSet::new(),
        };

        assert!(!auth.permits(false, &groups(&[])));
        assert!(auth.permits(true, &groups(&[])));
    }

    #[test]
    fn test_auth_groups_require_intersection() {
        let auth = AuthData {
            auth_required: true,
            auth_groups: groups(&[2, 3]),
        };

        assert!(!auth.permits(true, &groups(&[1])));
        assert!(auth.permits(true, &groups(&[1, 3])));
        assert!(!auth.permits(false, &groups(&[3])));
    }

    #[test]
    fn test_data_contains_subset() {
        let block = BlockDescriptor {
            block_id: 7,
            module: "Blog".to_owned(),
            action: None,
            data: Some(BTreeMap::from([
                ("category".to_owned(), "news".to_owned()),
                ("limit".to_owned(), "5".to_owned()),
            ])),
        };

        let news = BTreeMap::from([("category".to_owned(), "news".to_owned())]);
        let sports = BTreeMap::from([("category".to_owned(), "sports".to_owned())]);

        assert!(block.data_contains(&news));
        assert!(!block.data_contains(&sports));
        assert!(block.data_contains(&BTreeMap::new()));
    }

    #[test]
    fn test_data_contains_without_block_data() {
        let block = BlockDescriptor {
            block_id: 1,
            module: "Blog".to_owned(),
            action: None,
            data: None,
        };

        let filter = BTreeMap::from([("category".to_owned(), "news".to_owned())]);

        assert!(!block.data_contains(&filter));
    }

    #[test]
    fn test_menu_hidden_for_direct_actions() {
        let mut page = PageRecord::new(5, "About");
        assert!(!page.is_menu_hidden());

        page.tree_type = TreeType::DirectAction;
        assert!(page.is_menu_hidden());

        page.tree_type = TreeType::Normal;
        page.hidden = true;
        assert!(page.is_menu_hidden());
    }
}
