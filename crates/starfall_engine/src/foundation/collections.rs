//! Handle types for stable, non-owning references
//!
//! Collision data never owns the entities it reports to. Trees name their
//! owner by [`EntityId`], resolved through a registry at delivery time, so a
//! tree may briefly outlive its entity without dangling.

pub use slotmap::{SlotMap, SecondaryMap, Key};

slotmap::new_key_type! {
    /// Handle to a game entity that owns a hit-volume tree
    pub struct EntityId;

    /// Handle to a hit-volume tree inside a [`crate::physics::HitVolumeWorld`]
    pub struct TreeHandle;

    /// Handle to a projectile managed by the projectile system
    pub struct ProjectileId;
}

/// Handle-based map from entity handles to entity data
pub type EntityMap<T> = SlotMap<EntityId, T>;

/// Index of a node inside a single hit-volume tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Index of the root node of every tree
    pub const ROOT: Self = Self(0);

    /// Get the raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
