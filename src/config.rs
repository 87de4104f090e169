use std::{fs::File, io::BufReader, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voxels::CHUNK_SIZE;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainConfig {
    Sine {
        base: i32,
        amplitude: f32,
        frequency: f32,
    },
    Perlin {
        seed: u32,
        max_height: i32,
    },
    Flat {
        height: i32,
    },
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig::Sine {
            base: 8,
            amplitude: 3.0,
            frequency: 0.15,
        }
    }
}

/// World generation and player physics parameters
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_size: i32,
    /// Blocks/s², must be negative
    pub gravity: f32,
    pub jump_strength: f32,
    /// Distance from the camera down to the feet
    pub foot_offset: f32,
    /// Chunks generated on each side of the origin along x and z
    pub world_radius_chunks: i32,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub spawn: Vec3,
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE as i32,
            gravity: -20.0,
            jump_strength: 8.0,
            foot_offset: 1.6,
            world_radius_chunks: 1,
            move_speed: 5.0,
            mouse_sensitivity: 0.002,
            spawn: Vec3::new(0.0, 20.0, 0.0),
            terrain: TerrainConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<WorldConfig, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: WorldConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.chunk_size <= 0 {
            return invalid(format!("chunk_size must be > 0, got {}", self.chunk_size));
        }
        // Negated comparisons so NaN is rejected too
        if !(self.gravity < 0.0) {
            return invalid(format!("gravity must be < 0, got {}", self.gravity));
        }
        if !(self.foot_offset > 0.0) {
            return invalid(format!("foot_offset must be > 0, got {}", self.foot_offset));
        }
        if !(self.jump_strength > 0.0) {
            return invalid(format!(
                "jump_strength must be > 0, got {}",
                self.jump_strength
            ));
        }
        if !(self.move_speed > 0.0) {
            return invalid(format!("move_speed must be > 0, got {}", self.move_speed));
        }
        if self.world_radius_chunks < 0 {
            return invalid(format!(
                "world_radius_chunks must be >= 0, got {}",
                self.world_radius_chunks
            ));
        }
        if !self.spawn.is_finite() {
            return invalid(format!("spawn must be finite, got {}", self.spawn));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{ConfigError, TerrainConfig, WorldConfig};

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.world_radius_chunks, 1);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: WorldConfig =
            serde_json::from_str(r#"{ "gravity": -9.81, "spawn": [1.0, 30.0, -2.0] }"#).unwrap();
        assert_eq!(config.gravity, -9.81);
        assert_eq!(config.spawn, Vec3::new(1.0, 30.0, -2.0));
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.terrain, TerrainConfig::default());
    }

    #[test]
    fn terrain_is_tagged_by_kind() {
        let config: WorldConfig =
            serde_json::from_str(r#"{ "terrain": { "kind": "flat", "height": 4 } }"#).unwrap();
        assert_eq!(config.terrain, TerrainConfig::Flat { height: 4 });
        let config: WorldConfig = serde_json::from_str(
            r#"{ "terrain": { "kind": "perlin", "seed": 99, "max_height": 14 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.terrain,
            TerrainConfig::Perlin {
                seed: 99,
                max_height: 14
            }
        );
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            WorldConfig {
                chunk_size: 0,
                ..Default::default()
            },
            WorldConfig {
                gravity: 9.81,
                ..Default::default()
            },
            WorldConfig {
                foot_offset: 0.0,
                ..Default::default()
            },
            WorldConfig {
                jump_strength: -1.0,
                ..Default::default()
            },
            WorldConfig {
                world_radius_chunks: -1,
                ..Default::default()
            },
            WorldConfig {
                spawn: Vec3::new(0.0, f32::NAN, 0.0),
                ..Default::default()
            },
            WorldConfig {
                gravity: f32::NAN,
                ..Default::default()
            },
            WorldConfig {
                foot_offset: f32::NAN,
                ..Default::default()
            },
            WorldConfig {
                move_speed: f32::NAN,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = WorldConfig::load("does/not/exist.json");
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }
}
