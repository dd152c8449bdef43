//! Application error type

use starfall_engine::config::ConfigError;
use starfall_engine::physics::HitVolumeError;

/// Errors that stop the demo
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A hit-volume descriptor was rejected
    #[error("Hit-volume error: {0}")]
    HitVolume(#[from] HitVolumeError),

    /// A bundled descriptor failed to parse
    #[error("Asset error: {0}")]
    Asset(#[from] ron::error::SpannedError),
}
