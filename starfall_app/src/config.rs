//! Demo scene configuration

use serde::{Deserialize, Serialize};
use starfall_engine::config::{CollisionConfig, Config};

/// Bundled config, located independently of the working directory
pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/starfall.ron");

/// Tuning for the scripted demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Ticks to simulate
    pub ticks: u32,
    /// Seed for enemy placement
    pub seed: u64,
    /// Ticks between enemy spawns
    pub spawn_every: u32,
    /// Ticks between player shots
    pub fire_every: u32,
    /// Laser travel per tick
    pub laser_speed: f32,
    /// Damage per laser
    pub laser_damage: f32,
    /// Enemy descent per tick
    pub kamikaze_speed: f32,
    /// Collision tuning. Lasers stop at the first tree they hit
    pub collision: CollisionConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: 7,
            spawn_every: 45,
            fire_every: 4,
            laser_speed: 12.0,
            laser_damage: 60.0,
            kamikaze_speed: 1.2,
            collision: CollisionConfig {
                piercing_projectiles: false,
                ..CollisionConfig::default()
            },
        }
    }
}

impl Config for DemoConfig {}
