//! Registry of every hit-volume tree in play

use crate::config::CollisionConfig;
use crate::foundation::collections::{EntityId, SlotMap, TreeHandle};
use crate::physics::collision_layers::CollisionFilter;
use super::{HitVolumeDescriptor, HitVolumeError, HitVolumeTree};

/// Owns all trees and hands out stable [`TreeHandle`]s.
///
/// Destroying a tree only marks it; marked trees are skipped by every pass
/// and dropped on the next [`purge_destroyed`](Self::purge_destroyed).
#[derive(Debug, Default)]
pub struct HitVolumeWorld {
    trees: SlotMap<TreeHandle, HitVolumeTree>,
    max_tree_depth: Option<usize>,
}

impl HitVolumeWorld {
    /// Create an empty world using the default descriptor limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world whose spawned trees follow `config`
    pub fn with_config(config: &CollisionConfig) -> Self {
        Self {
            trees: SlotMap::with_key(),
            max_tree_depth: Some(config.max_tree_depth),
        }
    }

    /// Build a tree from `descriptor` for `owner` and register it
    pub fn spawn(
        &mut self,
        descriptor: &HitVolumeDescriptor,
        owner: EntityId,
        filter: CollisionFilter,
    ) -> Result<TreeHandle, HitVolumeError> {
        let tree = match self.max_tree_depth {
            Some(max_depth) => HitVolumeTree::with_max_depth(descriptor, owner, max_depth),
            None => HitVolumeTree::new(descriptor, owner),
        }
        .inspect_err(|e| log::warn!("rejected hit-volume descriptor for {:?}: {}", owner, e))?;

        Ok(self.insert(tree.with_filter(filter)))
    }

    /// Register an already built tree
    pub fn insert(&mut self, tree: HitVolumeTree) -> TreeHandle {
        self.trees.insert(tree)
    }

    /// Tree by handle; destroyed trees are still returned until purged
    pub fn get(&self, handle: TreeHandle) -> Option<&HitVolumeTree> {
        self.trees.get(handle)
    }

    /// Mutable tree by handle
    pub fn get_mut(&mut self, handle: TreeHandle) -> Option<&mut HitVolumeTree> {
        self.trees.get_mut(handle)
    }

    /// Enable a tree. Returns false for unknown handles
    pub fn enable(&mut self, handle: TreeHandle) -> bool {
        self.trees.get_mut(handle).map(HitVolumeTree::enable).is_some()
    }

    /// Disable a tree. Returns false for unknown handles
    pub fn disable(&mut self, handle: TreeHandle) -> bool {
        self.trees.get_mut(handle).map(HitVolumeTree::disable).is_some()
    }

    /// Mark a tree destroyed. Repeated or stale calls are no-ops
    pub fn destroy(&mut self, handle: TreeHandle) {
        if let Some(tree) = self.trees.get_mut(handle) {
            tree.destroy();
        }
    }

    /// Mark every tree owned by `owner` destroyed
    pub fn destroy_owned_by(&mut self, owner: EntityId) {
        for tree in self.trees.values_mut().filter(|tree| tree.owner() == owner) {
            tree.destroy();
        }
    }

    /// Drop destroyed trees, returning how many were removed
    pub fn purge_destroyed(&mut self) -> usize {
        let before = self.trees.len();
        self.trees.retain(|_, tree| !tree.is_destroyed());
        let removed = before - self.trees.len();
        if removed > 0 {
            log::debug!("purged {} destroyed hit-volume trees", removed);
        }
        removed
    }

    /// Trees that take part in collision passes: enabled and not destroyed
    pub fn active_trees(&self) -> impl Iterator<Item = (TreeHandle, &HitVolumeTree)> {
        self.trees.iter().filter(|(_, tree)| tree.is_enabled())
    }

    /// Handles of every tree owned by `owner`
    pub fn trees_of(&self, owner: EntityId) -> impl Iterator<Item = TreeHandle> + '_ {
        self.trees
            .iter()
            .filter(move |(_, tree)| tree.owner() == owner)
            .map(|(handle, _)| handle)
    }

    /// Number of registered trees, destroyed ones included until purged
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// No trees registered
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
