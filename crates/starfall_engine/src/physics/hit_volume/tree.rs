//! A hit-volume tree bound to one owning entity

use crate::foundation::collections::{EntityId, NodeIndex};
use crate::foundation::math::{Vec2, WorldTransform};
use crate::physics::collision::BoundingCircle;
use crate::physics::collision_layers::CollisionFilter;
use super::{HitVolumeDescriptor, HitVolumeError, HitVolumeKind, HitVolumeNode};

/// Default nesting limit for descriptors built without a [`crate::config::CollisionConfig`]
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// A live node's world-space circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveCircle {
    /// Node the circle belongs to
    pub node: NodeIndex,
    /// Node role
    pub kind: HitVolumeKind,
    /// Circle in world space
    pub circle: BoundingCircle,
}

/// Root node plus subtree, stored as an arena with the root at index 0.
///
/// The tree names its owner by [`EntityId`] only. It never keeps the owner
/// alive; the owner keeps the tree's handle and calls
/// [`enable`](Self::enable), [`disable`](Self::disable) and
/// [`destroy`](Self::destroy) as it enters and leaves play.
#[derive(Debug, Clone)]
pub struct HitVolumeTree {
    nodes: Vec<HitVolumeNode>,
    owner: EntityId,
    filter: CollisionFilter,
    destroyed: bool,
}

impl HitVolumeTree {
    /// Build a tree from a description, enabled, on every collision layer
    pub fn new(descriptor: &HitVolumeDescriptor, owner: EntityId) -> Result<Self, HitVolumeError> {
        Self::with_max_depth(descriptor, owner, DEFAULT_MAX_DEPTH)
    }

    /// Build a tree, rejecting descriptions nested deeper than `max_depth`
    pub fn with_max_depth(
        descriptor: &HitVolumeDescriptor,
        owner: EntityId,
        max_depth: usize,
    ) -> Result<Self, HitVolumeError> {
        descriptor.validate(max_depth)?;

        let mut nodes = Vec::with_capacity(descriptor.node_count());
        Self::instantiate(&mut nodes, descriptor, None, Vec2::zeros());

        log::debug!("built hit-volume tree with {} nodes for {:?}", nodes.len(), owner);

        Ok(Self {
            nodes,
            owner,
            filter: CollisionFilter::default(),
            destroyed: false,
        })
    }

    fn instantiate(
        nodes: &mut Vec<HitVolumeNode>,
        descriptor: &HitVolumeDescriptor,
        parent: Option<NodeIndex>,
        parent_offset: Vec2,
    ) -> NodeIndex {
        let index = NodeIndex(nodes.len());
        let accumulated_offset = parent_offset + descriptor.position;

        nodes.push(HitVolumeNode {
            kind: descriptor.code,
            shape: descriptor.shape,
            local_offset: descriptor.position,
            accumulated_offset,
            radius: descriptor.radius,
            parent,
            children: Vec::with_capacity(descriptor.children.len()),
            enabled: true,
        });

        for child in &descriptor.children {
            let child_index = Self::instantiate(nodes, child, Some(index), accumulated_offset);
            nodes[index.0].children.push(child_index);
        }

        index
    }

    /// Set the layer filter (builder form)
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the layer filter
    pub fn set_filter(&mut self, filter: CollisionFilter) {
        self.filter = filter;
    }

    /// Layer filter
    pub fn filter(&self) -> &CollisionFilter {
        &self.filter
    }

    /// Owning entity
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Root node
    pub fn root(&self) -> &HitVolumeNode {
        &self.nodes[NodeIndex::ROOT.0]
    }

    /// Node by index
    pub fn node(&self, index: NodeIndex) -> Option<&HitVolumeNode> {
        self.nodes.get(index.0)
    }

    /// All nodes in pre-order, root first
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &HitVolumeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeIndex(index), node))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The tree's outer bound, if it has one
    pub fn outer_node(&self) -> Option<NodeIndex> {
        self.nodes()
            .find(|(_, node)| node.kind == HitVolumeKind::Outer)
            .map(|(index, _)| index)
    }

    /// Make the tree eligible for collision passes again.
    ///
    /// Only the root flag changes, so descendants come back with whatever
    /// flags they had before [`disable`](Self::disable). Ignored once destroyed.
    pub fn enable(&mut self) {
        if self.destroyed {
            log::debug!("ignoring enable on destroyed tree of {:?}", self.owner);
            return;
        }
        self.nodes[NodeIndex::ROOT.0].enabled = true;
    }

    /// Take the whole tree out of collision passes
    pub fn disable(&mut self) {
        self.nodes[NodeIndex::ROOT.0].enabled = false;
    }

    /// Is the tree taking part in collision passes?
    pub fn is_enabled(&self) -> bool {
        !self.destroyed && self.root().enabled
    }

    /// Set one node's own flag. Disabling a node takes its whole subtree out
    pub fn set_node_enabled(&mut self, index: NodeIndex, enabled: bool) -> Result<(), HitVolumeError> {
        let node = self
            .nodes
            .get_mut(index.0)
            .ok_or(HitVolumeError::UnknownNode(index))?;
        node.enabled = enabled;
        Ok(())
    }

    /// A node is live when the tree is not destroyed and neither the node
    /// nor any ancestor is disabled
    pub fn is_node_live(&self, index: NodeIndex) -> bool {
        if self.destroyed {
            return false;
        }

        let mut current = Some(index);
        while let Some(node_index) = current {
            let Some(node) = self.node(node_index) else {
                return false;
            };
            if !node.enabled {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Permanently take the tree out of collision. Safe to call repeatedly;
    /// returns whether this call did the destroying
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        log::debug!("destroyed hit-volume tree of {:?}", self.owner);
        true
    }

    /// Has [`destroy`](Self::destroy) been called?
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// World-space circle of one node for an owner at `transform`
    pub fn world_circle(&self, index: NodeIndex, transform: &WorldTransform) -> Option<BoundingCircle> {
        self.node(index).map(|node| node.world_circle(transform))
    }

    /// World-space circles of every live node, in pre-order
    pub fn live_circles(&self, transform: &WorldTransform) -> Vec<LiveCircle> {
        let mut circles = Vec::with_capacity(self.nodes.len());
        if !self.is_enabled() {
            return circles;
        }

        // Pre-order layout means every parent is visited before its children
        let mut live = vec![false; self.nodes.len()];
        for (index, node) in self.nodes() {
            let parent_live = node.parent.map_or(true, |parent| live[parent.0]);
            live[index.0] = parent_live && node.enabled;

            if live[index.0] {
                circles.push(LiveCircle {
                    node: index,
                    kind: node.kind,
                    circle: node.world_circle(transform),
                });
            }
        }
        circles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::EntityMap;
    use crate::foundation::math::{world_transform, Point2};
    use approx::assert_relative_eq;

    fn owner() -> EntityId {
        let mut entities = EntityMap::<()>::with_key();
        entities.insert(())
    }

    fn shield_tree() -> HitVolumeTree {
        let descriptor = HitVolumeDescriptor::outer(9.0).with_children([
            HitVolumeDescriptor::body(3.0)
                .at(-4.5, -0.5)
                .with_child(HitVolumeDescriptor::body(1.0).at(-1.0, 0.0)),
            HitVolumeDescriptor::body(3.0).at(0.0, -1.5),
            HitVolumeDescriptor::body(3.0).at(4.5, -0.5),
        ]);
        HitVolumeTree::new(&descriptor, owner()).unwrap()
    }

    #[test]
    fn test_builds_full_subtree_in_preorder() {
        let tree = shield_tree();

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root().kind(), HitVolumeKind::Outer);
        assert_eq!(tree.root().children(), &[NodeIndex(1), NodeIndex(3), NodeIndex(4)]);
        assert_eq!(tree.node(NodeIndex(2)).unwrap().parent(), Some(NodeIndex(1)));
        assert_eq!(tree.outer_node(), Some(NodeIndex::ROOT));
    }

    #[test]
    fn test_offsets_accumulate_from_root() {
        let tree = shield_tree();
        let grandchild = tree.node(NodeIndex(2)).unwrap();

        assert_eq!(grandchild.local_offset(), Vec2::new(-1.0, 0.0));
        assert_eq!(grandchild.accumulated_offset(), Vec2::new(-5.5, -0.5));

        let circle = tree
            .world_circle(NodeIndex(2), &world_transform(Point2::new(10.0, 20.0), 0.0))
            .unwrap();
        assert_relative_eq!(circle.center.x, 4.5, epsilon = 1e-5);
        assert_relative_eq!(circle.center.y, 19.5, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_descriptor_is_refused() {
        let descriptor = HitVolumeDescriptor::outer(9.0).with_child(HitVolumeDescriptor::body(-1.0));
        let result = HitVolumeTree::new(&descriptor, owner());

        assert_eq!(result.unwrap_err(), HitVolumeError::InvalidRadius { radius: -1.0 });
    }

    #[test]
    fn test_disabling_root_makes_every_descendant_ineligible() {
        let mut tree = shield_tree();
        tree.disable();

        assert!(!tree.is_enabled());
        for (index, node) in tree.nodes() {
            assert!(!tree.is_node_live(index));
            if index != NodeIndex::ROOT {
                assert!(node.is_enabled(), "descendant flags are left alone");
            }
        }
        assert!(tree.live_circles(&WorldTransform::identity()).is_empty());
    }

    #[test]
    fn test_enable_restores_prior_descendant_flags() {
        let mut tree = shield_tree();
        tree.set_node_enabled(NodeIndex(3), false).unwrap();

        tree.disable();
        tree.enable();

        assert!(tree.is_node_live(NodeIndex(1)));
        assert!(!tree.is_node_live(NodeIndex(3)));
        assert!(tree.is_node_live(NodeIndex(4)));

        let live: Vec<NodeIndex> = tree
            .live_circles(&WorldTransform::identity())
            .iter()
            .map(|c| c.node)
            .collect();
        assert_eq!(live, vec![NodeIndex(0), NodeIndex(1), NodeIndex(2), NodeIndex(4)]);
    }

    #[test]
    fn test_disabling_inner_node_hides_its_subtree() {
        let mut tree = shield_tree();
        tree.set_node_enabled(NodeIndex(1), false).unwrap();

        assert!(!tree.is_node_live(NodeIndex(2)));
        assert!(tree.node(NodeIndex(2)).unwrap().is_enabled());
        assert_eq!(
            tree.set_node_enabled(NodeIndex(42), true),
            Err(HitVolumeError::UnknownNode(NodeIndex(42)))
        );
    }

    #[test]
    fn test_destroy_is_idempotent_and_final() {
        let mut tree = shield_tree();

        assert!(tree.destroy());
        assert!(!tree.destroy());

        tree.enable();
        assert!(tree.is_destroyed());
        assert!(!tree.is_enabled());
        assert!(!tree.is_node_live(NodeIndex::ROOT));
    }
}
