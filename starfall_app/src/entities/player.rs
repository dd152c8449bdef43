//! The player's ship

use starfall_engine::prelude::*;

use super::TreeState;
use crate::AppError;

const DESCRIPTOR: &str = include_str!("../../assets/player.ron");

/// Player ship. Loses a life per ram and fires straight up
#[derive(Debug, Clone)]
pub struct PlayerShip {
    position: Point2,
    speed: f32,
    lives: u32,
    rams_taken: u32,
}

impl PlayerShip {
    /// New ship at `position` with a number of lives
    pub fn new(position: Point2, speed: f32, lives: u32) -> Self {
        Self {
            position,
            speed,
            lives,
            rams_taken: 0,
        }
    }

    /// Hit-volume layout
    pub fn descriptor() -> Result<HitVolumeDescriptor, AppError> {
        Ok(ron::from_str(DESCRIPTOR)?)
    }

    /// Slide horizontally toward `x`, limited by the ship's speed
    pub fn steer_toward(&mut self, x: f32) {
        let delta = (x - self.position.x).clamp(-self.speed, self.speed);
        self.position.x += delta;
    }

    /// Where lasers leave the ship
    pub fn muzzle(&self) -> Point2 {
        self.position + Vec2::new(0.0, 6.0)
    }

    /// Current position
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Kamikazes that reached the ship
    pub fn rams_taken(&self) -> u32 {
        self.rams_taken
    }

    /// What the scene should do with the ship's tree
    pub fn tree_state(&self) -> TreeState {
        if self.lives == 0 {
            TreeState::Destroyed
        } else {
            TreeState::Enabled
        }
    }
}

impl CollisionReceiver for PlayerShip {
    fn world_transform(&self) -> WorldTransform {
        world_transform(self.position, 0.0)
    }

    fn acknowledge_signal(&mut self, _signal: &CollisionSignal, _last_signal_node: &ProjectilePath) {}

    fn acknowledge_target(&mut self, _target: &CollisionTarget, last_target_node: EntityId) {
        self.lives = self.lives.saturating_sub(1);
        self.rams_taken += 1;
        log::info!("player rammed by {:?}, {} lives left", last_target_node, self.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_is_speed_limited() {
        let mut ship = PlayerShip::new(Point2::new(0.0, -80.0), 1.5, 3);

        ship.steer_toward(10.0);
        assert_eq!(ship.position().x, 1.5);

        ship.steer_toward(2.0);
        assert_eq!(ship.position().x, 2.0);
    }

    #[test]
    fn test_rams_cost_lives() {
        let mut ship = PlayerShip::new(Point2::origin(), 1.0, 1);
        let mut ids = EntityMap::<()>::with_key();
        let other = ids.insert(());
        let mut trees = SlotMap::<TreeHandle, ()>::with_key();
        let target = CollisionTarget { other, other_tree: trees.insert(()), point: Point2::origin() };

        ship.acknowledge_target(&target, other);
        ship.acknowledge_target(&target, other);

        assert_eq!(ship.lives(), 0);
        assert_eq!(ship.rams_taken(), 2);
        assert_eq!(ship.tree_state(), TreeState::Destroyed);
    }

    #[test]
    fn test_descriptor_has_outer_bound() {
        let descriptor = PlayerShip::descriptor().unwrap();

        assert_eq!(descriptor.code, HitVolumeKind::Outer);
        assert_eq!(descriptor.node_count(), 4);
    }
}
