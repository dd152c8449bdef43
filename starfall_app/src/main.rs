//! Starfall demo: a scripted, headless wave of kamikaze ships against the
//! player's lasers, driven through the collision engine

#![allow(dead_code)]

mod config;
mod entities;
mod error;
mod scene;

use starfall_engine::config::Config;
use starfall_engine::foundation::logging::{self, LevelFilter};

use config::{DemoConfig, DEFAULT_CONFIG_PATH};
use error::AppError;
use scene::Scene;

fn run(config: DemoConfig) -> Result<(), AppError> {
    let ticks = config.ticks;
    let mut scene = Scene::new(config)?;

    for _ in 0..ticks {
        scene.tick()?;
        if scene.is_over() {
            log::info!("Player lost all lives at tick {}", scene.tick_count());
            break;
        }
    }

    let stats = scene.stats();
    println!("Starfall demo finished after {} ticks", scene.tick_count());
    println!("  shots fired:   {}", stats.shots_fired);
    println!("  laser hits:    {} ({} on shields)", stats.laser_hits, stats.shield_hits);
    println!("  shot down:     {}", stats.shot_down);
    println!("  rammed player: {}", stats.crashed);
    println!("  escaped:       {}", stats.escaped);
    println!("  contacts:      {}", stats.contacts);
    println!("  lives left:    {}", scene.player_lives());
    println!("  score:         {}", stats.score);
    Ok(())
}

fn main() -> Result<(), AppError> {
    logging::init_with_level(LevelFilter::Info);

    log::info!("Starting Starfall demo");

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = DemoConfig::load_or_default(&path)?;

    match run(config) {
        Ok(()) => {
            log::info!("Starfall demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Starfall demo failed: {:?}", e);
            Err(e)
        }
    }
}
