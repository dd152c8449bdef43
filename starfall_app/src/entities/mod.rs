//! Demo entities that own hit-volume trees

pub mod kamikaze;
pub mod player;
pub mod shield;

pub use kamikaze::{Fate, KamikazeShip, KamikazeVariant};
pub use player::PlayerShip;
pub use shield::{CrescentShield, ShieldParameters, VerticalDirection};

use starfall_engine::prelude::*;

/// What an entity wants done with its hit-volume tree before the next pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    /// Take part in collision passes
    Enabled,
    /// Skip passes for now
    Disabled,
    /// Gone for good
    Destroyed,
}

/// Every entity kind in the scene
#[derive(Debug, Clone)]
pub enum Actor {
    /// The player's ship
    Player(PlayerShip),
    /// An enemy ship
    Kamikaze(KamikazeShip),
    /// A shield carried by another actor
    Shield(CrescentShield),
}

impl Actor {
    /// What the scene should do with this actor's tree
    pub fn tree_state(&self) -> TreeState {
        match self {
            Self::Player(player) => player.tree_state(),
            Self::Kamikaze(ship) => ship.tree_state(),
            Self::Shield(shield) => shield.tree_state(),
        }
    }

    fn receiver(&self) -> &dyn CollisionReceiver {
        match self {
            Self::Player(player) => player,
            Self::Kamikaze(ship) => ship,
            Self::Shield(shield) => shield,
        }
    }

    fn receiver_mut(&mut self) -> &mut dyn CollisionReceiver {
        match self {
            Self::Player(player) => player,
            Self::Kamikaze(ship) => ship,
            Self::Shield(shield) => shield,
        }
    }
}

impl CollisionReceiver for Actor {
    fn world_transform(&self) -> WorldTransform {
        self.receiver().world_transform()
    }

    fn acknowledge_signal(&mut self, signal: &CollisionSignal, last_signal_node: &ProjectilePath) {
        self.receiver_mut().acknowledge_signal(signal, last_signal_node);
    }

    fn acknowledge_target(&mut self, target: &CollisionTarget, last_target_node: EntityId) {
        self.receiver_mut().acknowledge_target(target, last_target_node);
    }
}
