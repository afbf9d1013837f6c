//! Configuration system
//!
//! [`Config`] gives any serde type TOML / RON load and save keyed by file
//! extension. [`PhysicsConfig`] holds the tunables of a
//! [`Universe`](crate::world::Universe).

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::constants;
use crate::physics::{GravityPolicy, ResolutionConfig};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check invariants after loading
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = extension(path)
            .filter(|ext| matches!(*ext, "toml" | "ron"))
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path)?;

        let config: Self = if format == "toml" {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
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

    /// A value out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for a physics universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational constant used for all pairs
    pub gravitational_constant: f64,

    /// Which bodies exert and receive gravity
    pub gravity_policy: GravityPolicy,

    /// Optional cap on body speed after integration
    pub speed_limit: Option<f64>,

    /// Tick length used by fixed-step driving, in seconds
    pub fixed_timestep: f64,

    /// Most ticks run for a single frame when driving with a fixed step
    pub max_substeps: u32,

    /// What happens to colliding bodies
    pub resolution: ResolutionConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: constants::G,
            gravity_policy: GravityPolicy::default(),
            speed_limit: None,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 8,
            resolution: ResolutionConfig::default(),
        }
    }
}

impl Config for PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gravitational_constant must be finite and >= 0, got {}",
                self.gravitational_constant
            )));
        }
        if !(0.0..=1.0).contains(&self.resolution.restitution) {
            return Err(ConfigError::Invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.resolution.restitution
            )));
        }
        if let Some(limit) = self.speed_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "speed_limit must be positive, got {limit}"
                )));
            }
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid("max_substeps must be at least 1".to_string()));
        }
        Ok(())
    }
}
