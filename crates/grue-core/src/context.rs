//! Read-only snapshots of what the player can currently see, carry, and know.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

/// How an object in the context is available to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reach {
    /// Carried by the player.
    Inventory,
    /// Visible in the current scene.
    Scene,
    /// Discovered earlier but not currently at hand.
    Known,
}

impl Reach {
    /// Short phrase used when asking the player to disambiguate.
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Inventory => "in your inventory",
            Self::Scene => "in the room",
            Self::Known => "somewhere you have been",
        }
    }

    /// Whether the player can act on the object right now.
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Inventory | Self::Scene)
    }
}

/// View of the game state supplied with every parse call.
///
/// The parser never mutates a snapshot; the game-state component builds a
/// fresh one (or hands out a shared one) whenever the player types a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// The scene the player is currently in.
    #[serde(default)]
    pub scene_id: Option<String>,
    /// Objects visible in the current scene.
    #[serde(default)]
    pub visible: BTreeSet<ObjectId>,
    /// Objects carried by the player.
    #[serde(default)]
    pub inventory: BTreeSet<ObjectId>,
    /// Objects the player has discovered, wherever they are now.
    #[serde(default)]
    pub known: BTreeSet<ObjectId>,
}

impl ContextSnapshot {
    /// Create an empty snapshot for a scene.
    pub fn new(scene_id: impl Into<String>) -> Self {
        Self {
            scene_id: Some(scene_id.into()),
            ..Self::default()
        }
    }

    /// Add objects visible in the scene.
    pub fn with_visible<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        self.visible.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Add objects carried by the player.
    pub fn with_inventory<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        self.inventory.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Add objects the player has discovered.
    pub fn with_known<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        self.known.extend(ids.into_iter().map(Into::into));
        self
    }

    /// How the player can reach an object, preferring the closest relation.
    ///
    /// Returns `None` when the object is not part of the context at all.
    pub fn reach(&self, id: &ObjectId) -> Option<Reach> {
        if self.inventory.contains(id) {
            Some(Reach::Inventory)
        } else if self.visible.contains(id) {
            Some(Reach::Scene)
        } else if self.known.contains(id) {
            Some(Reach::Known)
        } else {
            None
        }
    }

    /// Whether the object is anywhere in the context (visible, carried or known).
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.reach(id).is_some()
    }

    /// Whether the player can act on the object right now.
    pub fn is_reachable(&self, id: &ObjectId) -> bool {
        self.reach(id).is_some_and(Reach::is_reachable)
    }

    /// Every object in the context, each once, in ID order.
    pub fn in_scope(&self) -> BTreeSet<&ObjectId> {
        self.visible
            .iter()
            .chain(&self.inventory)
            .chain(&self.known)
            .collect()
    }

    /// Objects the player can act on right now, in ID order.
    pub fn reachable(&self) -> BTreeSet<&ObjectId> {
        self.visible.iter().chain(&self.inventory).collect()
    }

    /// True when the context holds no objects at all.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.inventory.is_empty() && self.known.is_empty()
    }
}

/// Synchronous accessor for the current context, owned by the game state.
pub trait ContextProvider {
    /// Produce a snapshot of the player's current context.
    fn snapshot(&self) -> ContextSnapshot;
}

impl ContextProvider for ContextSnapshot {
    fn snapshot(&self) -> ContextSnapshot {
        self.clone()
    }
}

impl<F> ContextProvider for F
where
    F: Fn() -> ContextSnapshot,
{
    fn snapshot(&self) -> ContextSnapshot {
        self()
    }
}
