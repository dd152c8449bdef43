//! Configuration system

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Load configuration from file, falling back to defaults when the file is missing
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning for the collision dispatcher and hit-volume construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Slack added to a projectile's segment length when deciding whether an
    /// intersection lies within this tick's travel
    pub reach_epsilon: f32,

    /// Run the body-vs-body contact pass that delivers collision targets
    pub contact_events: bool,

    /// Deepest nesting accepted in a hit-volume descriptor (root is depth 0)
    pub max_tree_depth: usize,

    /// Let one projectile damage every tree on its path in a pass. When off,
    /// only the nearest tree gets an active signal and the rest get stale ones
    pub piercing_projectiles: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            reach_epsilon: 1e-4,
            contact_events: true,
            max_tree_depth: 8,
            piercing_projectiles: true,
        }
    }
}

impl Config for CollisionConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_config_from_toml_fills_defaults() {
        let config: CollisionConfig = toml::from_str("contact_events = false").unwrap();

        assert!(!config.contact_events);
        assert_eq!(config.max_tree_depth, CollisionConfig::default().max_tree_depth);
    }

    #[test]
    fn test_collision_config_from_ron() {
        let config: CollisionConfig =
            ron::from_str("(reach_epsilon: 0.5, max_tree_depth: 3)").unwrap();

        assert_eq!(config.reach_epsilon, 0.5);
        assert_eq!(config.max_tree_depth, 3);
        assert!(config.contact_events);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = CollisionConfig::default().save_to_file("collision.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = CollisionConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config, CollisionConfig::default());
    }
}
