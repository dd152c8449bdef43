//! # Starfall Engine
//!
//! Collision core for a 2D arcade shooter.
//!
//! ## Features
//!
//! - **Equation Solver**: Exact line/circle intersection with a reusable scratch buffer
//! - **Hit-Volume Trees**: Nested circles with coarse outer bounds and per-node enablement
//! - **Collision Dispatch**: Nearest-hit projectile resolution and body contacts
//! - **Collision Layers**: Bitmask filtering between factions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starfall_engine::prelude::*;
//!
//! struct Rock {
//!     position: Point2,
//!     hits: u32,
//! }
//!
//! impl CollisionReceiver for Rock {
//!     fn world_transform(&self) -> WorldTransform {
//!         world_transform(self.position, 0.0)
//!     }
//!
//!     fn acknowledge_signal(&mut self, signal: &CollisionSignal, _last: &ProjectilePath) {
//!         if signal.is_active {
//!             self.hits += 1;
//!         }
//!     }
//!
//!     fn acknowledge_target(&mut self, _target: &CollisionTarget, _last: EntityId) {}
//! }
//!
//! fn main() -> Result<(), HitVolumeError> {
//!     let mut rocks = EntityMap::with_key();
//!     let rock = rocks.insert(Rock { position: Point2::new(0.0, 0.0), hits: 0 });
//!
//!     let mut world = HitVolumeWorld::new();
//!     world.spawn(&HitVolumeDescriptor::body(3.0), rock, CollisionFilter::default())?;
//!
//!     let mut projectiles = SlotMap::<ProjectileId, ()>::with_key();
//!     let path = ProjectilePath::new(
//!         projectiles.insert(()),
//!         Point2::new(0.0, -50.0),
//!         Point2::new(0.0, 0.0),
//!         Some(10.0),
//!     );
//!
//!     let mut dispatcher = CollisionDispatcher::default();
//!     let hits = dispatcher.dispatch_projectiles(&world, &[path], &mut rocks);
//!     assert_eq!(hits.len(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        foundation::{
            collections::{EntityId, EntityMap, NodeIndex, ProjectileId, SlotMap, TreeHandle},
            math::{world_transform, Point2, Vec2, WorldTransform},
        },
        physics::{
            CollisionDispatcher, CollisionFilter, CollisionLayers, CollisionReceiver,
            CollisionSignal, CollisionTarget, ContactReport, HitReport, HitVolumeDescriptor,
            HitVolumeError, HitVolumeKind, HitVolumeTree, HitVolumeWorld, OwnerRegistry,
            ProjectilePath,
        },
    };
}
