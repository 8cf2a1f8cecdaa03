//! Current actor, as reported by the authentication subsystem.

use std::collections::BTreeSet;

use sitenav_graph::GroupId;

static NO_GROUPS: BTreeSet<GroupId> = BTreeSet::new();

/// Authentication state of the actor behind a request.
pub trait AuthProvider {
    /// Whether the actor is logged in.
    fn is_authenticated(&self) -> bool;

    /// Profile groups the actor belongs to.
    fn groups(&self) -> &BTreeSet<GroupId>;
}

/// Visitor that is not logged in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anonymous;

impl AuthProvider for Anonymous {
    fn is_authenticated(&self) -> bool {
        false
    }

    fn groups(&self) -> &BTreeSet<GroupId> {
        &NO_GROUPS
    }
}

/// Logged-in profile.
#[derive(Clone, Debug, Default)]
pub struct Actor {
    groups: BTreeSet<GroupId>,
}

impl Actor {
    /// Create an actor belonging to the given groups.
    #[must_use]
    pub fn new(groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }
}

impl AuthProvider for Actor {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn groups(&self) -> &BTreeSet<GroupId> {
        &self.groups
    }
}
