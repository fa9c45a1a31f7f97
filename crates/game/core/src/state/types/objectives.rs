use std::collections::{BTreeMap, BTreeSet};

use super::common::PlayerId;
use super::task::TaskCategory;

/// Category claims and objective-ready flags.
///
/// A category has at most one owner at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveBoard {
    pub owners: BTreeMap<TaskCategory, PlayerId>,
    pub ready: BTreeSet<TaskCategory>,
}

impl ObjectiveBoard {
    pub fn owner(&self, category: TaskCategory) -> Option<PlayerId> {
        self.owners.get(&category).copied()
    }

    /// True if `category` is unclaimed or claimed by `player`.
    pub fn is_open_to(&self, category: TaskCategory, player: PlayerId) -> bool {
        self.owner(category).is_none_or(|owner| owner == player)
    }

    /// Claims `category` for `player` if nobody holds it; returns whether a claim happened.
    pub fn claim(&mut self, category: TaskCategory, player: PlayerId) -> bool {
        if self.owners.contains_key(&category) {
            return false;
        }
        self.owners.insert(category, player);
        true
    }

    pub fn is_ready(&self, category: TaskCategory) -> bool {
        self.ready.contains(&category)
    }

    pub fn mark_ready(&mut self, category: TaskCategory) -> bool {
        self.ready.insert(category)
    }
}
