//! Physics module for 2D projectile and contact collision
//!
//! Provides the line/circle equation solver, hierarchical hit-volume trees
//! and the dispatcher that turns intersections into events for the owning
//! entities.

pub mod collision;
pub mod collision_layers;
pub mod dispatcher;
pub mod equation_solver;
pub mod events;
pub mod hit_volume;

pub use collision::{BoundingCircle, HitVolumeShape, Segment};
pub use collision_layers::{CollisionFilter, CollisionLayers};
pub use dispatcher::{CollisionDispatcher, ContactReport, HitReport};
pub use equation_solver::{
    EquationSolver,
    IntersectionPoint,
    LineCircleIntersection,
    LineEquation,
    LineKind,
    CircleEquation,
};
pub use events::{
    CollisionReceiver,
    CollisionSignal,
    CollisionTarget,
    OwnerRegistry,
    ProjectilePath,
};
pub use hit_volume::{
    HitVolumeDescriptor,
    HitVolumeError,
    HitVolumeKind,
    HitVolumeNode,
    HitVolumeTree,
    HitVolumeWorld,
    LiveCircle,
};
