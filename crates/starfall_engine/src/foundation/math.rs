//! Math utilities and types
//!
//! The playfield is a 2D plane; everything collision-related works in `f32`
//! on top of nalgebra's 2D types.

pub use nalgebra::{Isometry2, Translation2, UnitComplex, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Rigid world transform of an entity (position + orientation, no scale)
pub type WorldTransform = Isometry2<f32>;

/// Math constants
pub mod constants {
    /// Pi
    pub const PI: f32 = std::f32::consts::PI;
    /// Pi / 2
    pub const FRAC_PI_2: f32 = std::f32::consts::FRAC_PI_2;
}

/// Build a world transform from a position and a rotation angle in radians
pub fn world_transform(position: Point2, angle: f32) -> WorldTransform {
    Isometry2::new(position.coords, angle)
}

/// Sign of a value as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f32::signum`], zero (of either sign) maps to `0.0`.
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Returns true when both points are exactly equal
pub fn is_degenerate_segment(start: &Point2, end: &Point2) -> bool {
    start.x == end.x && start.y == end.y
}
