//! Regenerating crescent shield carried in front of a ship
//!
//! The shield soaks damage until its health runs out, then breaks and stops
//! taking hits. It keeps regenerating while broken and comes back once health
//! climbs over the minimum viable health.

use starfall_engine::prelude::*;

use super::TreeState;
use crate::AppError;

const DESCRIPTOR: &str = include_str!("../../assets/crescent_shield.ron");

/// Which way the crescent bulges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    /// Toward +y
    Up,
    /// Toward -y
    Down,
}

impl VerticalDirection {
    fn factor(self) -> f32 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Shield tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldParameters {
    /// Health needed to come back after breaking; 40% of maximum when unset
    pub minimum_health: Option<f32>,
    /// Starting and maximum health
    pub maximum_health: f32,
    /// Health regained per tick
    pub health_regeneration: f32,
    /// Orientation of the crescent
    pub vertical_direction: VerticalDirection,
    /// Offset from the carrying ship
    pub offset: Vec2,
}

/// Shield entity. Follows its carrier at a fixed offset
#[derive(Debug, Clone)]
pub struct CrescentShield {
    carrier: EntityId,
    offset: Vec2,
    position: Point2,

    health: f32,
    minimum_health: f32,
    maximum_health: f32,
    health_regeneration: f32,

    deployed: bool,
    is_broken: bool,
    is_being_destroyed: bool,
    hits_absorbed: u32,
}

impl CrescentShield {
    /// Create a shield for `carrier`. It starts at full health but stays
    /// out of collision until [`deploy`](Self::deploy)
    pub fn new(carrier: EntityId, parameters: ShieldParameters) -> Self {
        let minimum_health = parameters
            .minimum_health
            .unwrap_or(parameters.maximum_health * 0.4);

        Self {
            carrier,
            offset: parameters.offset,
            position: Point2::origin(),
            health: parameters.maximum_health,
            minimum_health,
            maximum_health: parameters.maximum_health,
            health_regeneration: parameters.health_regeneration,
            deployed: false,
            is_broken: false,
            is_being_destroyed: false,
            hits_absorbed: 0,
        }
    }

    /// Hit-volume layout for a shield facing `direction`
    pub fn descriptor(direction: VerticalDirection) -> Result<HitVolumeDescriptor, AppError> {
        let mut descriptor: HitVolumeDescriptor = ron::from_str(DESCRIPTOR)?;
        orient(&mut descriptor, direction.factor());
        Ok(descriptor)
    }

    /// Move along with the carrier
    pub fn follow(&mut self, carrier_position: Point2) {
        self.position = carrier_position + self.offset;
    }

    /// Start taking hits, called when the carrier enters the screen
    pub fn deploy(&mut self) {
        self.deployed = true;
    }

    /// Per-tick regeneration and rebuild
    pub fn update(&mut self) {
        if self.health < 0.0 {
            self.health = 0.0;
        }

        if self.health <= self.maximum_health {
            self.health = (self.health + self.health_regeneration).min(self.maximum_health);
        }

        if self.health >= self.minimum_health && self.is_broken {
            self.build();
        }
    }

    /// Share of health above the minimum, between 0 and 1
    pub fn viable_health_ratio(&self) -> f32 {
        if self.health < self.minimum_health {
            return 0.0;
        }
        let viable = self.maximum_health - self.minimum_health;
        if viable <= 0.0 {
            return 1.0;
        }
        ((self.health - self.minimum_health) / viable).min(1.0)
    }

    fn build(&mut self) {
        self.is_broken = false;
        log::debug!("shield of {:?} rebuilt at {:.0} health", self.carrier, self.health);
    }

    fn break_down(&mut self) {
        if self.is_broken {
            return;
        }
        self.is_broken = true;
        log::debug!("shield of {:?} broke", self.carrier);
    }

    /// Remove the shield for good. Safe to call more than once
    pub fn destroy(&mut self) {
        if self.is_being_destroyed {
            return;
        }
        self.is_being_destroyed = true;
        log::debug!("shield of {:?} destroyed", self.carrier);
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health needed to rebuild after breaking
    pub fn minimum_health(&self) -> f32 {
        self.minimum_health
    }

    /// Broken shields do not take hits
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Has [`destroy`](Self::destroy) been called?
    pub fn is_being_destroyed(&self) -> bool {
        self.is_being_destroyed
    }

    /// Damaging hits taken so far
    pub fn hits_absorbed(&self) -> u32 {
        self.hits_absorbed
    }

    /// What the scene should do with this shield's tree
    pub fn tree_state(&self) -> TreeState {
        if self.is_being_destroyed {
            TreeState::Destroyed
        } else if self.deployed && !self.is_broken {
            TreeState::Enabled
        } else {
            TreeState::Disabled
        }
    }
}

impl CollisionReceiver for CrescentShield {
    fn world_transform(&self) -> WorldTransform {
        world_transform(self.position, 0.0)
    }

    fn acknowledge_signal(&mut self, signal: &CollisionSignal, _last_signal_node: &ProjectilePath) {
        if !signal.is_active {
            return;
        }

        self.health -= signal.damage.unwrap_or(0.0);
        self.hits_absorbed += 1;

        if self.health <= 0.0 {
            self.break_down();
        }
    }

    fn acknowledge_target(&mut self, target: &CollisionTarget, _last_target_node: EntityId) {
        log::debug!("shield of {:?} touched by {:?}", self.carrier, target.other);
    }
}

/// Flip child offsets for the crescent's facing
fn orient(descriptor: &mut HitVolumeDescriptor, factor: f32) {
    for child in &mut descriptor.children {
        child.position.y *= factor;
        orient(child, factor);
    }
}
