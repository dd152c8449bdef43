//! Kamikaze enemies diving at the player
//!
//! Alpha is a bare hull. Beta is tougher and carries a crescent shield below
//! it, which only deploys once the ship is on screen.

use starfall_engine::prelude::*;

use super::shield::{ShieldParameters, VerticalDirection};
use super::TreeState;
use crate::AppError;

const DESCRIPTOR: &str = include_str!("../../assets/kamikaze.ron");

/// Kamikaze flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KamikazeVariant {
    /// Basic hull
    Alpha,
    /// Shielded hull
    Beta,
}

impl KamikazeVariant {
    /// Starting health
    pub fn health(self) -> f32 {
        match self {
            Self::Alpha => 1000.0,
            Self::Beta => 1750.0,
        }
    }

    /// Score awarded for shooting it down
    pub fn score(self) -> u32 {
        match self {
            Self::Alpha => 100,
            Self::Beta => 250,
        }
    }

    /// Shield carried below the hull, if any
    pub fn shield(self) -> Option<ShieldParameters> {
        match self {
            Self::Alpha => None,
            Self::Beta => Some(ShieldParameters {
                minimum_health: Some(200.0),
                maximum_health: 500.0,
                health_regeneration: 2.0,
                vertical_direction: VerticalDirection::Down,
                offset: Vec2::new(0.0, -7.0),
            }),
        }
    }
}

/// How a kamikaze left the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Still flying
    Flying,
    /// Shot down, worth its score
    ShotDown,
    /// Rammed something
    Crashed,
    /// Flew off the bottom of the screen
    Escaped,
}

/// Kamikaze ship entity
#[derive(Debug, Clone)]
pub struct KamikazeShip {
    variant: KamikazeVariant,
    position: Point2,
    velocity: Vec2,
    health: f32,
    on_screen: bool,
    fate: Fate,
    shield: Option<EntityId>,
}

impl KamikazeShip {
    /// New ship waiting above the screen
    pub fn new(variant: KamikazeVariant, position: Point2, velocity: Vec2) -> Self {
        Self {
            variant,
            position,
            velocity,
            health: variant.health(),
            on_screen: false,
            fate: Fate::Flying,
            shield: None,
        }
    }

    /// Hull hit-volume layout, shared by every variant
    pub fn descriptor() -> Result<HitVolumeDescriptor, AppError> {
        Ok(ron::from_str(DESCRIPTOR)?)
    }

    /// Remember the entity of the carried shield
    pub fn attach_shield(&mut self, shield: EntityId) {
        self.shield = Some(shield);
    }

    /// Entity of the carried shield
    pub fn shield(&self) -> Option<EntityId> {
        self.shield
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Called once when the ship crosses into the playfield
    pub fn enter_screen(&mut self) {
        self.on_screen = true;
    }

    /// Called when the ship leaves the playfield for good
    pub fn escape(&mut self) {
        if self.fate == Fate::Flying {
            self.fate = Fate::Escaped;
        }
    }

    /// Variant
    pub fn variant(&self) -> KamikazeVariant {
        self.variant
    }

    /// Current position
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Is it inside the playfield?
    pub fn is_on_screen(&self) -> bool {
        self.on_screen
    }

    /// How it ended, or [`Fate::Flying`]
    pub fn fate(&self) -> Fate {
        self.fate
    }

    /// What the scene should do with this ship's tree
    pub fn tree_state(&self) -> TreeState {
        match self.fate {
            Fate::Flying if self.on_screen => TreeState::Enabled,
            Fate::Flying => TreeState::Disabled,
            _ => TreeState::Destroyed,
        }
    }
}

impl CollisionReceiver for KamikazeShip {
    fn world_transform(&self) -> WorldTransform {
        world_transform(self.position, 0.0)
    }

    fn acknowledge_signal(&mut self, signal: &CollisionSignal, _last_signal_node: &ProjectilePath) {
        if !signal.is_active || self.fate != Fate::Flying {
            return;
        }

        self.health -= signal.damage.unwrap_or(0.0);
        if self.health <= 0.0 {
            self.fate = Fate::ShotDown;
            log::debug!("{:?} shot down at ({:.1}, {:.1})", self.variant, self.position.x, self.position.y);
        }
    }

    fn acknowledge_target(&mut self, _target: &CollisionTarget, last_target_node: EntityId) {
        if self.fate != Fate::Flying {
            return;
        }
        self.health = 0.0;
        self.fate = Fate::Crashed;
        log::debug!("{:?} rammed {:?}", self.variant, last_target_node);
    }
}
