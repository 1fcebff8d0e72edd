//! Favorite set and toggle bookkeeping.
//!
//! [`FavoriteSet`] only ever holds what the server last reported.
//! [`PendingToggles`] remembers the outcome of mutations whose follow-up read
//! has not been applied yet, so a later toggle of the same dish picks the
//! right direction without touching the visible set.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::entities::DishId;

/// Dish ids favorited by the current user, as of the last applied read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<DishId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = DishId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: DishId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DishId> + '_ {
        self.ids.iter().copied()
    }

    /// Replace the whole membership with a server snapshot.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = DishId>) {
        self.ids = ids.into_iter().collect();
    }
}

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl FavoriteAction {
    /// The action that flips the given membership.
    pub fn toggling(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        }
    }

    /// Membership once this action has been applied by the server.
    pub fn resulting_membership(self) -> bool {
        matches!(self, FavoriteAction::Add)
    }
}

impl fmt::Display for FavoriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteAction::Add => write!(f, "added"),
            FavoriteAction::Remove => write!(f, "removed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMembership {
    member: bool,
    /// Number of reads issued when the mutation completed. Any read with a
    /// higher sequence number observes the mutation.
    issued_reads: u64,
}

/// Confirmed mutations not yet covered by an applied read.
#[derive(Debug, Clone, Default)]
pub struct PendingToggles {
    pending: HashMap<DishId, PendingMembership>,
}

impl PendingToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership implied by the latest unobserved mutation of `id`, if any.
    pub fn expected(&self, id: DishId) -> Option<bool> {
        self.pending.get(&id).map(|p| p.member)
    }

    /// Membership to base the next toggle of `id` on.
    pub fn effective_membership(&self, id: DishId, favorites: &FavoriteSet) -> bool {
        self.expected(id).unwrap_or_else(|| favorites.contains(id))
    }

    /// Record a mutation the server accepted.
    pub fn record(&mut self, id: DishId, action: FavoriteAction, issued_reads: u64) {
        self.pending.insert(
            id,
            PendingMembership {
                member: action.resulting_membership(),
                issued_reads,
            },
        );
    }

    /// Drop every entry observed by the read with sequence number `read_seq`.
    pub fn settle(&mut self, read_seq: u64) {
        self.pending.retain(|_, p| p.issued_reads >= read_seq);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
