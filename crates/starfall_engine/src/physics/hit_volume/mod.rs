//! Hierarchical circular hit-volumes attached to entities
//!
//! Each entity that can be hit owns one [`HitVolumeTree`], built from a
//! [`HitVolumeDescriptor`]. The root is usually a coarse `Outer` bound and the
//! `Body` children are the parts that actually take hits. Trees store only
//! offsets relative to their owner; the owner supplies its world transform
//! when a pass runs.
//!
//! Trees live in a [`HitVolumeWorld`], which hands out [`TreeHandle`]s and
//! keeps destroyed trees out of every pass until they are purged.
//!
//! [`TreeHandle`]: crate::foundation::collections::TreeHandle

pub mod descriptor;
pub mod node;
pub mod tree;
pub mod world;

pub use descriptor::{HitVolumeDescriptor, HitVolumeKind};
pub use node::HitVolumeNode;
pub use tree::{HitVolumeTree, LiveCircle};
pub use world::HitVolumeWorld;

use crate::foundation::collections::NodeIndex;

/// Errors raised while building or editing a hit-volume tree
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HitVolumeError {
    /// Radius is zero, negative or not finite
    #[error("hit-volume radius must be positive and finite, got {radius}")]
    InvalidRadius {
        /// The rejected radius
        radius: f32,
    },

    /// Offset has a NaN or infinite component
    #[error("hit-volume offset must be finite, got ({x}, {y})")]
    InvalidOffset {
        /// x component
        x: f32,
        /// y component
        y: f32,
    },

    /// More than one `Outer` node in one tree
    #[error("a hit-volume tree may have at most one outer node, found {count}")]
    MultipleOuterNodes {
        /// Number of outer nodes found
        count: usize,
    },

    /// Descriptor nests deeper than allowed
    #[error("hit-volume descriptor nests deeper than {max_depth} levels")]
    TooDeep {
        /// Configured limit
        max_depth: usize,
    },

    /// Node index out of range for this tree
    #[error("no node {0} in this hit-volume tree")]
    UnknownNode(NodeIndex),
}
