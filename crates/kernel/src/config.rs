//! Session configuration: puzzle solutions, reach distances, rewards.
//!
//! Defaults reproduce the shipped room. A config file only needs the
//! sections it overrides.

use dreamroom_common::{Digit, ItemKind};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rotation: RotationConfig,
    pub safe: SafeConfig,
    pub door: DoorConfig,
    pub lighting: LightingConfig,
    pub progression: ProgressionConfig,
}

/// Painting rotation puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Rotation added by one click, in degrees.
    pub step_degrees: f64,
    /// Maximum absolute distance (radians, exclusive) between an angle and a target.
    pub tolerance: f64,
    /// Accepted angles per painting, in radians.
    pub targets: [Vec<f64>; 3],
}

impl RotationConfig {
    pub fn step_radians(&self) -> f64 {
        self.step_degrees.to_radians()
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            step_degrees: -22.5,
            tolerance: 0.01,
            targets: [
                vec![0.0, -PI, -2.0 * PI, -3.0 * PI],
                vec![
                    -1.178_097_245_096_172_4,
                    -4.319_689_898_685_965,
                    -7.461_282_552_275_762,
                    -10.602_875_205_865_558,
                ],
                vec![
                    -2.748_893_571_891_069,
                    -5.890_486_225_480_863,
                    -9.032_078_879_070_66,
                    -12.173_671_532_660_457,
                ],
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeConfig {
    pub secret: [Digit; 4],
}

impl Default for SafeConfig {
    fn default() -> Self {
        let d = |v| Digit::new(v).unwrap_or_default();
        Self {
            secret: [d(3), d(2), d(1), d(6)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    pub position: Vec3,
    /// The player must be strictly closer than this to use the key.
    pub reach: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 5.0),
            reach: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Total light intensity at or below which hidden objects are revealed.
    pub darkness_threshold: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            darkness_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Granted when the safe opens.
    pub safe_reward: ItemKind,
    /// Granted when the lever is pulled with the paintings aligned.
    pub rotation_reward: ItemKind,
    /// Delay between pulling the lever and the closing cinematic.
    pub cinematic_delay_ms: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            safe_reward: ItemKind::Lever,
            rotation_reward: ItemKind::Key,
            cinematic_delay_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rotation = &self.rotation;
        if !rotation.step_degrees.is_finite() || rotation.step_degrees == 0.0 {
            return Err(invalid("rotation.step_degrees", "must be finite and non-zero"));
        }
        if !rotation.tolerance.is_finite() || rotation.tolerance <= 0.0 {
            return Err(invalid("rotation.tolerance", "must be finite and positive"));
        }
        for (i, targets) in rotation.targets.iter().enumerate() {
            if targets.is_empty() {
                return Err(invalid(
                    "rotation.targets",
                    format!("painting {} has no target angle", i + 1),
                ));
            }
            if targets.iter().any(|t| !t.is_finite()) {
                return Err(invalid(
                    "rotation.targets",
                    format!("painting {} has a non-finite angle", i + 1),
                ));
            }
        }
        if !self.door.position.is_finite() {
            return Err(invalid("door.position", "must be finite"));
        }
        if self.door.reach.is_nan() || self.door.reach <= 0.0 {
            return Err(invalid("door.reach", "must be positive"));
        }
        let threshold = self.lighting.darkness_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(invalid("lighting.darkness_threshold", "must not be negative"));
        }
        if self.progression.safe_reward == self.progression.rotation_reward {
            return Err(invalid(
                "progression",
                format!(
                    "safe_reward and rotation_reward are both {}",
                    self.progression.safe_reward
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
