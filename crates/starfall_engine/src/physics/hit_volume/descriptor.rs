//! Construction-time description of a hit-volume tree
//!
//! Descriptors are plain data so that entity layouts can live in RON files:
//!
//! ```ron
//! (
//!     code: Outer,
//!     radius: 9.0,
//!     children: [
//!         (code: Body, position: (-4.5, -0.5), radius: 3.0),
//!         (code: Body, position: (0.0, -1.5), radius: 3.0),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;
use crate::physics::collision::HitVolumeShape;
use super::HitVolumeError;

/// Role of a node in its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitVolumeKind {
    /// Coarse bound that only gates testing of its subtree
    Outer,
    /// Part of the entity that takes hits and contacts
    Body,
}

/// One node of a tree description, with its nested children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitVolumeDescriptor {
    /// Node role
    pub code: HitVolumeKind,

    /// Node shape
    #[serde(default)]
    pub shape: HitVolumeShape,

    /// Offset from the parent node (or from the entity origin for the root)
    #[serde(default = "zero_offset", with = "offset_serde")]
    pub position: Vec2,

    /// Circle radius
    pub radius: f32,

    /// Nested nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HitVolumeDescriptor>,
}

fn zero_offset() -> Vec2 {
    Vec2::zeros()
}

/// Offsets read and write as `(x, y)` tuples
mod offset_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::foundation::math::Vec2;

    pub fn serialize<S: Serializer>(offset: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        (offset.x, offset.y).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let (x, y) = <(f32, f32)>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

impl HitVolumeDescriptor {
    /// Circular node of the given kind at the parent's origin
    pub fn new(code: HitVolumeKind, radius: f32) -> Self {
        Self {
            code,
            shape: HitVolumeShape::Circular,
            position: Vec2::zeros(),
            radius,
            children: Vec::new(),
        }
    }

    /// Circular outer bound
    pub fn outer(radius: f32) -> Self {
        Self::new(HitVolumeKind::Outer, radius)
    }

    /// Circular body part
    pub fn body(radius: f32) -> Self {
        Self::new(HitVolumeKind::Body, radius)
    }

    /// Set the offset from the parent
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: HitVolumeDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = HitVolumeDescriptor>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this description
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Check the whole description before anything is built.
    ///
    /// Every radius must be positive and finite, every offset finite, the
    /// nesting no deeper than `max_depth` and at most one node may be `Outer`.
    pub fn validate(&self, max_depth: usize) -> Result<(), HitVolumeError> {
        let mut outer_count = 0;
        self.validate_node(0, max_depth, &mut outer_count)?;

        if outer_count > 1 {
            return Err(HitVolumeError::MultipleOuterNodes { count: outer_count });
        }
        Ok(())
    }

    fn validate_node(
        &self,
        depth: usize,
        max_depth: usize,
        outer_count: &mut usize,
    ) -> Result<(), HitVolumeError> {
        if depth > max_depth {
            return Err(HitVolumeError::TooDeep { max_depth });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(HitVolumeError::InvalidRadius { radius: self.radius });
        }
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(HitVolumeError::InvalidOffset {
                x: self.position.x,
                y: self.position.y,
            });
        }
        if self.code == HitVolumeKind::Outer {
            *outer_count += 1;
        }

        for child in &self.children {
            child.validate_node(depth + 1, max_depth, outer_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crescent() -> HitVolumeDescriptor {
        HitVolumeDescriptor::outer(9.0).with_children([
            HitVolumeDescriptor::body(3.0).at(-4.5, -0.5),
            HitVolumeDescriptor::body(3.0).at(0.0, -1.5),
            HitVolumeDescriptor::body(3.0).at(4.5, -0.5),
        ])
    }

    #[test]
    fn test_valid_descriptor_passes() {
        let descriptor = crescent();

        assert_eq!(descriptor.node_count(), 4);
        assert!(descriptor.validate(8).is_ok());
    }

    #[test]
    fn test_rejects_bad_radius() {
        let zero = HitVolumeDescriptor::outer(9.0).with_child(HitVolumeDescriptor::body(0.0));
        assert_eq!(zero.validate(8), Err(HitVolumeError::InvalidRadius { radius: 0.0 }));

        let negative = HitVolumeDescriptor::body(-2.0);
        assert_eq!(negative.validate(8), Err(HitVolumeError::InvalidRadius { radius: -2.0 }));

        assert!(HitVolumeDescriptor::body(f32::NAN).validate(8).is_err());
    }

    #[test]
    fn test_rejects_second_outer() {
        let descriptor = crescent().with_child(HitVolumeDescriptor::outer(2.0));

        assert_eq!(
            descriptor.validate(8),
            Err(HitVolumeError::MultipleOuterNodes { count: 2 })
        );
    }

    #[test]
    fn test_rejects_deep_nesting() {
        let descriptor = HitVolumeDescriptor::outer(9.0)
            .with_child(HitVolumeDescriptor::body(3.0).with_child(HitVolumeDescriptor::body(1.0)));

        assert!(descriptor.validate(2).is_ok());
        assert_eq!(descriptor.validate(1), Err(HitVolumeError::TooDeep { max_depth: 1 }));
    }

    #[test]
    fn test_parses_ron_layout() {
        let text = r"(
            code: Outer,
            radius: 9.0,
            children: [
                (code: Body, shape: Circular, position: (-4.5, -0.5), radius: 3.0),
                (code: Body, position: (0.0, -1.5), radius: 3.0),
            ],
        )";

        let descriptor: HitVolumeDescriptor = ron::from_str(text).unwrap();

        assert_eq!(descriptor.code, HitVolumeKind::Outer);
        assert_eq!(descriptor.position, Vec2::zeros());
        assert_eq!(descriptor.children.len(), 2);
        assert_eq!(descriptor.children[0].position, Vec2::new(-4.5, -0.5));
        assert_eq!(descriptor.children[1].shape, HitVolumeShape::Circular);
    }
}
