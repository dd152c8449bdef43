//! Collision events and the contract entities implement to receive them
//!
//! A damaging projectile hit arrives as a [`CollisionSignal`], a body-to-body
//! touch as a [`CollisionTarget`]. The receiving entity decides what either
//! means; nothing in the collision subsystem changes entity state itself.

use crate::foundation::collections::{EntityId, ProjectileId, SlotMap, TreeHandle};
use crate::foundation::math::{Point2, WorldTransform};
use crate::physics::collision::Segment;
use crate::physics::collision_layers::CollisionFilter;

/// Damaging hit delivered to the owner of the struck tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSignal {
    /// False for an already spent projectile. Receivers must treat the
    /// signal as a no-op but may still do bookkeeping
    pub is_active: bool,
    /// Damage carried by the projectile, if any
    pub damage: Option<f32>,
}

/// Non-damaging contact delivered to both owners of two touching trees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionTarget {
    /// The other party
    pub other: EntityId,
    /// Tree of the other party that was touched
    pub other_tree: TreeHandle,
    /// Midpoint between the two touching circles
    pub point: Point2,
}

/// One projectile's travel for this tick, as supplied by the projectile system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectilePath {
    /// Projectile handle, passed back with every signal it causes
    pub id: ProjectileId,
    /// Previous position to current position
    pub segment: Segment,
    /// Damage dealt on hit
    pub damage: Option<f32>,
    /// Whether the projectile can still deal damage
    pub is_active: bool,
    /// Layer filter of the projectile
    pub filter: CollisionFilter,
}

impl ProjectilePath {
    /// Active projectile on every layer
    pub fn new(id: ProjectileId, previous: Point2, current: Point2, damage: Option<f32>) -> Self {
        Self {
            id,
            segment: Segment::new(previous, current),
            damage,
            is_active: true,
            filter: CollisionFilter::default(),
        }
    }

    /// Set the layer filter (builder form)
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Mark the projectile spent (builder form)
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Implemented by every entity that owns a hit-volume tree
pub trait CollisionReceiver {
    /// Current world transform; hit-volume offsets are applied on top of it
    fn world_transform(&self) -> WorldTransform;

    /// A projectile struck one of this entity's body nodes
    fn acknowledge_signal(&mut self, signal: &CollisionSignal, last_signal_node: &ProjectilePath);

    /// Another entity's body touched one of this entity's body nodes
    fn acknowledge_target(&mut self, target: &CollisionTarget, last_target_node: EntityId);
}

/// Resolves a tree's owner handle to the entity at delivery time
pub trait OwnerRegistry {
    /// Shared access to an owner, `None` if it no longer exists
    fn owner(&self, id: EntityId) -> Option<&dyn CollisionReceiver>;

    /// Mutable access to an owner, `None` if it no longer exists
    fn owner_mut(&mut self, id: EntityId) -> Option<&mut dyn CollisionReceiver>;
}

impl<T: CollisionReceiver> OwnerRegistry for SlotMap<EntityId, T> {
    fn owner(&self, id: EntityId) -> Option<&dyn CollisionReceiver> {
        self.get(id).map(|owner| owner as &dyn CollisionReceiver)
    }

    fn owner_mut(&mut self, id: EntityId) -> Option<&mut dyn CollisionReceiver> {
        self.get_mut(id).map(|owner| owner as &mut dyn CollisionReceiver)
    }
}
