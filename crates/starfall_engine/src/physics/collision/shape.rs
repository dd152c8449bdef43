//! Model-space hit-volume shapes
//!
//! A shape is stored relative to its owning entity. It is moved into world
//! space only while a pass tests it.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Point2, Vec2, WorldTransform};
use super::primitives::BoundingCircle;

/// Hit-volume shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitVolumeShape {
    /// A circle, sized by the node's radius
    #[default]
    Circular,
}

impl HitVolumeShape {
    /// Transform this shape to world space.
    ///
    /// `local_offset` is the accumulated offset from the entity origin. The
    /// radius is not scaled: entity transforms are rigid.
    pub fn to_world_space(
        self,
        transform: &WorldTransform,
        local_offset: &Vec2,
        radius: f32,
    ) -> BoundingCircle {
        match self {
            Self::Circular => {
                let center = transform * Point2::from(*local_offset);
                BoundingCircle::new(center, radius)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::PI, world_transform};
    use approx::assert_relative_eq;

    #[test]
    fn test_offset_follows_entity_rotation() {
        let transform = world_transform(Point2::new(0.0, 10.0), PI);
        let circle = HitVolumeShape::Circular.to_world_space(&transform, &Vec2::new(0.0, -7.0), 3.0);

        assert_relative_eq!(circle.center.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(circle.center.y, 17.0, epsilon = 1e-5);
        assert_eq!(circle.radius, 3.0);
    }
}
