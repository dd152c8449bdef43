//! Collision layer system for filtering collision detection
//!
//! Every tree and projectile sits on a layer and carries a mask of the layers
//! it reacts to. A pair is tested only when each side's layer is in the
//! other's mask, so a player's lasers never hit the player's own ship.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionLayers: u32 {
        /// Player ship
        const PLAYER = 1 << 0;
        /// Enemy ships
        const ENEMY = 1 << 1;
        /// Projectiles fired by the player
        const PLAYER_PROJECTILE = 1 << 2;
        /// Projectiles fired by enemies
        const ENEMY_PROJECTILE = 1 << 3;
        /// Shields, which absorb hits for whatever carries them
        const SHIELD = 1 << 4;
        /// Static obstacles
        const ENVIRONMENT = 1 << 5;
    }
}

impl CollisionLayers {
    /// Check if two parties should collide based on their layers and masks
    ///
    /// # Example
    /// ```
    /// use starfall_engine::physics::CollisionLayers;
    ///
    /// let laser = CollisionLayers::PLAYER_PROJECTILE;
    /// let laser_mask = CollisionLayers::ENEMY | CollisionLayers::SHIELD;
    ///
    /// let enemy = CollisionLayers::ENEMY;
    /// let enemy_mask = CollisionLayers::PLAYER | CollisionLayers::PLAYER_PROJECTILE;
    ///
    /// assert!(CollisionLayers::should_collide(laser, laser_mask, enemy, enemy_mask));
    /// ```
    pub fn should_collide(
        layer_a: CollisionLayers,
        mask_a: CollisionLayers,
        layer_b: CollisionLayers,
        mask_b: CollisionLayers,
    ) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        mask_b.intersects(layer_a) && mask_a.intersects(layer_b)
    }
}

/// A layer together with the mask of layers it reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    /// Layer this party sits on
    pub layer: CollisionLayers,
    /// Layers this party reacts to
    pub mask: CollisionLayers,
}

impl CollisionFilter {
    /// Create a filter
    pub fn new(layer: CollisionLayers, mask: CollisionLayers) -> Self {
        Self { layer, mask }
    }

    /// Check this filter against another
    pub fn accepts(&self, other: &CollisionFilter) -> bool {
        CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
    }
}

impl Default for CollisionFilter {
    /// On every layer, reacting to every layer
    fn default() -> Self {
        Self {
            layer: CollisionLayers::all(),
            mask: CollisionLayers::all(),
        }
    }
}
