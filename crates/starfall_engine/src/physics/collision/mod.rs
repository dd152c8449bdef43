//! Collision geometry
//!
//! Hit-volumes are stored relative to their owning entity and transformed to
//! world space only when a pass tests them.
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (segments, circles)
//! - [`shape`] - Model-space hit-volume shapes and their world-space form

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{BoundingCircle, Segment};
pub use shape::HitVolumeShape;
