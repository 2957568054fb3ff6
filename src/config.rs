//! # World Configuration
//!
//! Sizes and asset locations for a run. Values come from `assets/world.json`
//! when that file exists and fall back to [`WorldConfig::default`] otherwise.
//! The configuration is validated before any window or GPU resource is
//! created, so a bad chunk size stops the program at start-up instead of
//! being clamped.

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::EngineError;

/// Default location of the configuration file.
pub const CONFIG_PATH: &str = "assets/world.json";

/// Edge length of a chunk, in voxels.
pub const DEFAULT_CHUNK_SIZE: i32 = 8;
/// Number of chunks generated in each direction from the origin.
pub const DEFAULT_WORLD_SIZE: i32 = 3;

/// Settings that govern world generation and the window it is shown in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of a chunk in voxels. Must be positive.
    pub chunk_size: i32,
    /// Chunks extend over `[-world_size, world_size]` on every axis. Must not be negative.
    pub world_size: i32,
    /// Initial window width in physical pixels
    pub window_width: u32,
    /// Initial window height in physical pixels
    pub window_height: u32,
    /// Window title
    pub window_title: String,
    /// WGSL source for the chunk pipeline
    pub shader_path: PathBuf,
    /// Diffuse texture applied to every block face
    pub texture_path: PathBuf,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            world_size: DEFAULT_WORLD_SIZE,
            window_width: 800,
            window_height: 450,
            window_title: String::from("OpenMiner"),
            shader_path: PathBuf::from("assets/shaders/chunk.wgsl"),
            texture_path: PathBuf::from("assets/textures/block.png"),
        }
    }
}

impl WorldConfig {
    /// Loads the configuration from `path`, or returns the defaults if the file does not exist.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    /// * [`EngineError::Asset`] if the file exists but cannot be read
    /// * [`EngineError::ConfigParse`] if the file is not valid JSON for this struct
    /// * [`EngineError::Configuration`] if a value is out of range
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Asset {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Loaded world configuration from {}", path.display());
            Self::from_json(&contents)?
        } else {
            info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON. Missing fields take their default values.
    pub fn from_json(contents: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Checks every value against its legal range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(EngineError::Configuration(format!(
                "window extent must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        chunk_count(self.chunk_size, self.world_size)?;
        Ok(())
    }
}

/// Number of chunks in a world of `(2 * world_size + 1)³` chunks of `chunk_size³` voxels.
///
/// Every voxel coordinate the world samples, including the neighbor just past
/// the outermost chunk, must fit in an `i32`.
///
/// # Errors
/// Returns [`EngineError::Configuration`] if `chunk_size` is not positive,
/// `world_size` is negative, or the world is too large to address.
pub fn chunk_count(chunk_size: i32, world_size: i32) -> Result<usize, EngineError> {
    if chunk_size <= 0 {
        return Err(EngineError::Configuration(format!(
            "chunk_size must be positive, got {chunk_size}"
        )));
    }
    if world_size < 0 {
        return Err(EngineError::Configuration(format!(
            "world_size must not be negative, got {world_size}"
        )));
    }

    let too_large = || {
        EngineError::Configuration(format!(
            "world_size {world_size} with chunk_size {chunk_size} is too large"
        ))
    };

    world_size
        .checked_mul(chunk_size)
        .and_then(|extent| extent.checked_add(chunk_size))
        .ok_or_else(too_large)?;

    usize::try_from(world_size)
        .ok()
        .and_then(|n| n.checked_mul(2))
        .and_then(|n| n.checked_add(1))
        .and_then(|per_axis| per_axis.checked_pow(3))
        .ok_or_else(too_large)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.world_size, 3);
        assert!(config.validate().is_ok());
        assert_eq!(chunk_count(config.chunk_size, config.world_size).unwrap(), 343);
    }

    #[test]
    fn test_non_positive_chunk_size_is_rejected() {
        for chunk_size in [0, -1, -8] {
            let config = WorldConfig {
                chunk_size,
                ..WorldConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(EngineError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_negative_world_size_is_rejected() {
        let config = WorldConfig {
            world_size: -1,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "world_size": 0 }"#).unwrap();
        assert_eq!(config.world_size, 0);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(chunk_count(config.chunk_size, config.world_size).unwrap(), 1);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = WorldConfig::from_json("{ chunk_size: ");
        assert!(matches!(result, Err(EngineError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = WorldConfig::load(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = WorldConfig::load(Path::new(CONFIG_PATH)).unwrap();
        assert_eq!(config, WorldConfig::default());
        assert!(config.shader_path.exists());
        assert!(config.texture_path.exists());
    }

    #[test]
    fn test_oversized_world_is_rejected() {
        let config = WorldConfig {
            chunk_size: 100_000_000,
            world_size: 30,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::Configuration(_))
        ));

        // The outermost neighbor sample would be i32::MAX + 1.
        assert!(matches!(
            chunk_count(1, i32::MAX),
            Err(EngineError::Configuration(_))
        ));

        // Coordinates fit, but (2^31 + 1)^3 chunks do not.
        assert!(matches!(
            chunk_count(1, 1 << 30),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_large_addressable_world_is_accepted() {
        // 1000 * 2_000_000 + 2_000_000 stays below i32::MAX.
        assert_eq!(chunk_count(2_000_000, 1000).unwrap(), 2001usize.pow(3));
    }
}
