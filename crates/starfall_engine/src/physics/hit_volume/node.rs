//! A single circular hit-volume inside a tree's node arena

use crate::foundation::collections::NodeIndex;
use crate::foundation::math::{Vec2, WorldTransform};
use crate::physics::collision::{BoundingCircle, HitVolumeShape};
use super::HitVolumeKind;

/// One node of a [`super::HitVolumeTree`].
///
/// Nodes refer to each other by [`NodeIndex`] into the owning tree's arena;
/// a node is owned by exactly one tree and has at most one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct HitVolumeNode {
    pub(super) kind: HitVolumeKind,
    pub(super) shape: HitVolumeShape,
    pub(super) local_offset: Vec2,
    /// Sum of local offsets from the root down to this node
    pub(super) accumulated_offset: Vec2,
    pub(super) radius: f32,
    pub(super) parent: Option<NodeIndex>,
    pub(super) children: Vec<NodeIndex>,
    pub(super) enabled: bool,
}

impl HitVolumeNode {
    /// Role of this node
    pub fn kind(&self) -> HitVolumeKind {
        self.kind
    }

    /// Shape of this node
    pub fn shape(&self) -> HitVolumeShape {
        self.shape
    }

    /// Offset from the parent node
    pub fn local_offset(&self) -> Vec2 {
        self.local_offset
    }

    /// Offset from the owning entity's origin
    pub fn accumulated_offset(&self) -> Vec2 {
        self.accumulated_offset
    }

    /// Circle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Direct children in description order
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// This node's own flag. Ancestors can still make it ineligible,
    /// see [`super::HitVolumeTree::is_node_live`]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// World-space circle for an owner at `transform`
    pub fn world_circle(&self, transform: &WorldTransform) -> BoundingCircle {
        self.shape
            .to_world_space(transform, &self.accumulated_offset, self.radius)
    }
}
