//! Headless demo scene
//!
//! Owns the entities, their hit-volume trees and the lasers in flight, and
//! steps them one tick at a time:
//!
//! 1. spawn and move entities, shields following their carriers
//! 2. fire and move lasers
//! 3. projectile pass, then contact pass
//! 4. per-entity updates
//! 5. push each entity's wanted tree state into the world
//! 6. remove finished entities and purge their trees

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starfall_engine::foundation::collections::SecondaryMap;
use starfall_engine::prelude::*;

use crate::config::DemoConfig;
use crate::entities::{
    Actor, CrescentShield, Fate, KamikazeShip, KamikazeVariant, PlayerShip, TreeState,
};
use crate::AppError;

/// Top edge of the playfield
pub const FIELD_TOP: f32 = 100.0;
/// Bottom edge of the playfield
pub const FIELD_BOTTOM: f32 = -100.0;
/// Margin outside the playfield where things spawn or get culled
const FIELD_MARGIN: f32 = 20.0;
/// Enemies spawn within this distance of the center line
const SPAWN_HALF_WIDTH: f32 = 40.0;
/// Chance for a spawned enemy to be shielded
const BETA_CHANCE: f64 = 0.4;

const PLAYER_START: (f32, f32) = (0.0, -80.0);
const PLAYER_SPEED: f32 = 1.5;
const PLAYER_LIVES: u32 = 3;

fn player_filter() -> CollisionFilter {
    CollisionFilter::new(
        CollisionLayers::PLAYER,
        CollisionLayers::ENEMY | CollisionLayers::ENEMY_PROJECTILE,
    )
}

fn enemy_filter() -> CollisionFilter {
    CollisionFilter::new(
        CollisionLayers::ENEMY,
        CollisionLayers::PLAYER | CollisionLayers::PLAYER_PROJECTILE,
    )
}

fn shield_filter() -> CollisionFilter {
    CollisionFilter::new(CollisionLayers::SHIELD, CollisionLayers::PLAYER_PROJECTILE)
}

fn laser_filter() -> CollisionFilter {
    CollisionFilter::new(
        CollisionLayers::PLAYER_PROJECTILE,
        CollisionLayers::ENEMY | CollisionLayers::SHIELD,
    )
}

/// A laser in flight
#[derive(Debug, Clone, Copy)]
struct Laser {
    position: Point2,
}

/// Running totals for the summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Lasers fired
    pub shots_fired: u32,
    /// Lasers that struck something
    pub laser_hits: u32,
    /// Of those, hits soaked by a shield
    pub shield_hits: u32,
    /// Enemies shot down
    pub shot_down: u32,
    /// Enemies that rammed the player
    pub crashed: u32,
    /// Enemies that flew past
    pub escaped: u32,
    /// Body contacts reported
    pub contacts: u32,
    /// Score from enemies shot down
    pub score: u32,
}

/// Demo scene
pub struct Scene {
    config: DemoConfig,
    actors: EntityMap<Actor>,
    trees: SecondaryMap<EntityId, TreeHandle>,
    world: HitVolumeWorld,
    dispatcher: CollisionDispatcher,
    lasers: SlotMap<ProjectileId, Laser>,
    player: EntityId,
    rng: StdRng,
    tick: u32,
    stats: Stats,
}

impl Scene {
    /// Build the scene with the player's ship in place
    pub fn new(config: DemoConfig) -> Result<Self, AppError> {
        let mut actors = EntityMap::with_key();
        let mut trees = SecondaryMap::new();
        let mut world = HitVolumeWorld::with_config(&config.collision);

        let player = actors.insert(Actor::Player(PlayerShip::new(
            Point2::new(PLAYER_START.0, PLAYER_START.1),
            PLAYER_SPEED,
            PLAYER_LIVES,
        )));
        let tree = world.spawn(&PlayerShip::descriptor()?, player, player_filter())?;
        trees.insert(player, tree);

        Ok(Self {
            dispatcher: CollisionDispatcher::new(config.collision.clone()),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            actors,
            trees,
            world,
            lasers: SlotMap::with_key(),
            player,
            tick: 0,
            stats: Stats::default(),
        })
    }

    /// Advance the scene by one tick
    pub fn tick(&mut self) -> Result<(), AppError> {
        self.tick += 1;

        if self.tick % self.config.spawn_every.max(1) == 0 {
            let x = self.rng.gen_range(-SPAWN_HALF_WIDTH..SPAWN_HALF_WIDTH);
            let variant = if self.rng.gen_bool(BETA_CHANCE) {
                KamikazeVariant::Beta
            } else {
                KamikazeVariant::Alpha
            };
            self.spawn_kamikaze(variant, x)?;
        }

        self.move_actors();
        self.fire();
        let paths = self.move_lasers();

        let hits = self
            .dispatcher
            .dispatch_projectiles(&self.world, &paths, &mut self.actors);
        self.record_hits(&hits);

        let contacts = self.dispatcher.dispatch_contacts(&self.world, &mut self.actors);
        self.stats.contacts += contacts.len() as u32;

        for actor in self.actors.values_mut() {
            if let Actor::Shield(shield) = actor {
                shield.update();
            }
        }

        self.sync_trees();
        self.cleanup();
        Ok(())
    }

    /// Put a kamikaze above the screen at `x`, with its shield if it has one
    pub fn spawn_kamikaze(&mut self, variant: KamikazeVariant, x: f32) -> Result<EntityId, AppError> {
        let position = Point2::new(x, FIELD_TOP + FIELD_MARGIN);
        let ship = KamikazeShip::new(variant, position, Vec2::new(0.0, -self.config.kamikaze_speed));

        let id = self.actors.insert(Actor::Kamikaze(ship));
        self.add_tree(id, &KamikazeShip::descriptor()?, enemy_filter())?;

        if let Some(parameters) = variant.shield() {
            let mut shield = CrescentShield::new(id, parameters);
            shield.follow(position);
            let descriptor = CrescentShield::descriptor(parameters.vertical_direction)?;

            let shield_id = self.actors.insert(Actor::Shield(shield));
            self.add_tree(shield_id, &descriptor, shield_filter())?;

            if let Some(Actor::Kamikaze(ship)) = self.actors.get_mut(id) {
                ship.attach_shield(shield_id);
            }
        }

        log::debug!("spawned {:?} at x = {:.1}", variant, x);
        Ok(id)
    }

    /// Spawn a tree that stays out of passes until its owner says otherwise
    fn add_tree(
        &mut self,
        owner: EntityId,
        descriptor: &HitVolumeDescriptor,
        filter: CollisionFilter,
    ) -> Result<(), AppError> {
        let spawned = self.world.spawn(descriptor, owner, filter);
        let tree = match spawned {
            Ok(tree) => tree,
            Err(e) => {
                self.actors.remove(owner);
                return Err(e.into());
            }
        };
        self.world.disable(tree);
        self.trees.insert(owner, tree);
        Ok(())
    }

    fn move_actors(&mut self) {
        let mut carriers = Vec::new();
        let mut lowest: Option<Point2> = None;

        for actor in self.actors.values_mut() {
            let Actor::Kamikaze(ship) = actor else {
                continue;
            };
            ship.advance();

            let position = ship.position();
            if !ship.is_on_screen() && position.y <= FIELD_TOP {
                ship.enter_screen();
            }
            if position.y < FIELD_BOTTOM - FIELD_MARGIN {
                ship.escape();
            }

            if ship.is_on_screen() && lowest.map_or(true, |p| position.y < p.y) {
                lowest = Some(position);
            }
            if let Some(shield) = ship.shield() {
                carriers.push((shield, position, ship.is_on_screen()));
            }
        }

        for (shield_id, position, on_screen) in carriers {
            if let Some(Actor::Shield(shield)) = self.actors.get_mut(shield_id) {
                shield.follow(position);
                if on_screen {
                    shield.deploy();
                }
            }
        }

        if let (Some(target), Some(Actor::Player(player))) = (lowest, self.actors.get_mut(self.player)) {
            player.steer_toward(target.x);
        }
    }

    fn fire(&mut self) {
        if self.tick % self.config.fire_every.max(1) != 0 {
            return;
        }
        let Some(Actor::Player(player)) = self.actors.get(self.player) else {
            return;
        };
        if player.lives() == 0 {
            return;
        }

        self.lasers.insert(Laser { position: player.muzzle() });
        self.stats.shots_fired += 1;
    }

    fn move_lasers(&mut self) -> Vec<ProjectilePath> {
        let speed = self.config.laser_speed;
        let damage = self.config.laser_damage;

        self.lasers
            .iter_mut()
            .map(|(id, laser)| {
                let previous = laser.position;
                laser.position.y += speed;
                ProjectilePath::new(id, previous, laser.position, Some(damage)).with_filter(laser_filter())
            })
            .collect()
    }

    fn record_hits(&mut self, hits: &[HitReport]) {
        for hit in hits.iter().filter(|hit| hit.signal.is_active) {
            self.stats.laser_hits += 1;
            if let Some(Actor::Shield(shield)) = self.actors.get(hit.owner) {
                self.stats.shield_hits += 1;
                log::debug!(
                    "shield {:?} took a laser, {:.0}% of viable health left",
                    hit.owner,
                    shield.viable_health_ratio() * 100.0
                );
            }
            self.lasers.remove(hit.projectile);
        }
    }

    fn sync_trees(&mut self) {
        for (id, actor) in &self.actors {
            let Some(&tree) = self.trees.get(id) else {
                continue;
            };
            match actor.tree_state() {
                TreeState::Enabled => {
                    self.world.enable(tree);
                }
                TreeState::Disabled => {
                    self.world.disable(tree);
                }
                TreeState::Destroyed => self.world.destroy(tree),
            }
        }
    }

    fn cleanup(&mut self) {
        let finished: Vec<(EntityId, Fate, KamikazeVariant, Option<EntityId>)> = self
            .actors
            .iter()
            .filter_map(|(id, actor)| match actor {
                Actor::Kamikaze(ship) if ship.fate() != Fate::Flying => {
                    Some((id, ship.fate(), ship.variant(), ship.shield()))
                }
                _ => None,
            })
            .collect();

        for (id, fate, variant, shield) in finished {
            match fate {
                Fate::ShotDown => {
                    self.stats.shot_down += 1;
                    self.stats.score += variant.score();
                }
                Fate::Crashed => self.stats.crashed += 1,
                Fate::Escaped => self.stats.escaped += 1,
                Fate::Flying => {}
            }

            if let Some(shield_id) = shield {
                if let Some(Actor::Shield(shield)) = self.actors.get_mut(shield_id) {
                    shield.destroy();
                }
                self.remove_actor(shield_id);
            }
            self.remove_actor(id);
        }

        self.lasers
            .retain(|_, laser| laser.position.y <= FIELD_TOP + FIELD_MARGIN);
        self.world.purge_destroyed();
    }

    fn remove_actor(&mut self, id: EntityId) {
        self.world.destroy_owned_by(id);
        self.trees.remove(id);
        self.actors.remove(id);
    }

    /// Has the player run out of lives?
    pub fn is_over(&self) -> bool {
        matches!(self.actors.get(self.player), Some(Actor::Player(player)) if player.lives() == 0)
    }

    /// Lives the player has left
    pub fn player_lives(&self) -> u32 {
        match self.actors.get(self.player) {
            Some(Actor::Player(player)) => player.lives(),
            _ => 0,
        }
    }

    /// Ticks simulated so far
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// Running totals
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Registered hit-volume trees
    pub fn tree_count(&self) -> usize {
        self.world.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(fire_every: u32) -> DemoConfig {
        DemoConfig {
            spawn_every: u32::MAX,
            fire_every,
            ..DemoConfig::default()
        }
    }

    fn ship(scene: &Scene, id: EntityId) -> Option<&KamikazeShip> {
        match scene.actors.get(id) {
            Some(Actor::Kamikaze(ship)) => Some(ship),
            _ => None,
        }
    }

    #[test]
    fn test_new_scene_has_only_the_player() {
        let scene = Scene::new(DemoConfig::default()).unwrap();

        assert_eq!(scene.tree_count(), 1);
        assert_eq!(scene.player_lives(), PLAYER_LIVES);
        assert!(!scene.is_over());
    }

    #[test]
    fn test_beta_trees_wait_for_the_screen() {
        let mut scene = Scene::new(quiet_config(u32::MAX)).unwrap();
        let id = scene.spawn_kamikaze(KamikazeVariant::Beta, 0.0).unwrap();

        assert_eq!(scene.tree_count(), 3);
        assert_eq!(scene.world.active_trees().count(), 1);

        // 120 down to 100 at 1.2 per tick
        for _ in 0..17 {
            scene.tick().unwrap();
        }
        assert!(ship(&scene, id).unwrap().is_on_screen());
        assert_eq!(scene.world.active_trees().count(), 3);
    }

    #[test]
    fn test_shield_takes_lasers_meant_for_its_carrier() {
        let mut scene = Scene::new(quiet_config(20)).unwrap();
        let id = scene.spawn_kamikaze(KamikazeVariant::Beta, 0.0).unwrap();

        for _ in 0..45 {
            scene.tick().unwrap();
        }

        assert!(scene.stats().shield_hits > 0);
        assert_eq!(scene.stats().shield_hits, scene.stats().laser_hits);
        assert_eq!(ship(&scene, id).unwrap().health(), KamikazeVariant::Beta.health());
    }

    #[test]
    fn test_ramming_costs_a_life_and_purges_the_ship() {
        let mut scene = Scene::new(quiet_config(u32::MAX)).unwrap();
        let id = scene.spawn_kamikaze(KamikazeVariant::Beta, 0.0).unwrap();

        for _ in 0..200 {
            scene.tick().unwrap();
        }

        assert!(ship(&scene, id).is_none());
        assert_eq!(scene.stats().crashed, 1);
        assert_eq!(scene.player_lives(), PLAYER_LIVES - 1);
        assert_eq!(scene.tree_count(), 1);
        assert_eq!(scene.actors.len(), 1);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let config = DemoConfig {
            ticks: 300,
            ..DemoConfig::default()
        };
        let run = |config: &DemoConfig| {
            let mut scene = Scene::new(config.clone()).unwrap();
            for _ in 0..config.ticks {
                scene.tick().unwrap();
            }
            scene.stats().clone()
        };

        let first = run(&config);
        assert_eq!(first, run(&config));
        assert!(first.shots_fired > 0);
    }
}
