//! Primitive collision shapes and intersection tests
//!
//! These are the cheap boolean tests. Exact hit points come from the
//! [`crate::physics::equation_solver`].

use crate::foundation::math::{Point2, Vec2};

/// A projectile's travel during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position at the previous tick
    pub start: Point2,
    /// Position at the current tick
    pub end: Point2,
}

impl Segment {
    /// Creates a segment from the previous and current position
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Travel vector, not normalized
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length of travel
    pub fn length(&self) -> f32 {
        self.direction().magnitude()
    }

    /// True when start and end coincide
    pub fn is_degenerate(&self) -> bool {
        crate::foundation::math::is_degenerate_segment(&self.start, &self.end)
    }

    /// Point on the segment nearest to `point`
    pub fn closest_point(&self, point: &Point2) -> Point2 {
        let travel = self.direction();
        let length_squared = travel.magnitude_squared();
        if length_squared <= f32::EPSILON * f32::EPSILON {
            return self.start;
        }

        let t = ((point - self.start).dot(&travel) / length_squared).clamp(0.0, 1.0);
        self.start + travel * t
    }

    /// Does any part of the segment touch the circle?
    pub fn intersects_circle(&self, circle: &BoundingCircle) -> bool {
        circle.contains_point(&self.closest_point(&circle.center))
    }
}

/// A bounding circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle in world space
    pub center: Point2,
    /// The radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Point2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another (touching counts)
    pub fn intersects(&self, other: &BoundingCircle) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if a point is inside or on the circle
    pub fn contains_point(&self, point: &Point2) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// Midpoint between the two centers, used as the contact point of overlapping circles
    pub fn contact_point(&self, other: &BoundingCircle) -> Point2 {
        nalgebra::center(&self.center, &other.center)
    }
}
