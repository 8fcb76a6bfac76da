//! # Configuration
//!
//! Construction-time configuration for the world: grid extent, chunk extents,
//! terrain noise parameters, mesh colors and the worker pool size.
//!
//! Every field has a default equal to the reference constants, so a JSON file
//! only needs to name the values it changes:
//!
//! ```json
//! { "world": { "max_chunks_x": 4, "max_chunks_y": 4 }, "terrain": { "seed": 7 } }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Number of chunk slots along each horizontal axis of the world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldExtent {
    pub max_chunks_x: usize,
    pub max_chunks_y: usize,
}

impl Default for WorldExtent {
    fn default() -> Self {
        WorldExtent {
            max_chunks_x: 64,
            max_chunks_y: 64,
        }
    }
}

impl WorldExtent {
    /// Total number of chunk slots.
    pub fn slot_count(&self) -> usize {
        self.max_chunks_x * self.max_chunks_y
    }
}

/// Size of a chunk in cells. `sz` is the vertical axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkExtents {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl Default for ChunkExtents {
    fn default() -> Self {
        ChunkExtents {
            sx: 8,
            sy: 8,
            sz: 32,
        }
    }
}

impl ChunkExtents {
    pub const fn new(sx: usize, sy: usize, sz: usize) -> Self {
        ChunkExtents { sx, sy, sz }
    }

    /// Number of cells in one horizontal layer.
    pub fn plane_size(&self) -> usize {
        self.sx * self.sy
    }

    /// Number of cells in a chunk.
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }
}

/// Frequency and octave count for one `perlin2d` call.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    pub frequency: f32,
    pub octaves: u32,
}

impl NoiseParams {
    pub const fn new(frequency: f32, octaves: u32) -> Self {
        NoiseParams { frequency, octaves }
    }
}

/// Parameters of the height-field terrain.
///
/// Column height is
/// `height_noise * sz - height_base_offset + detail_noise * detail_amplitude`,
/// where the height sample is taken at `x + height_sample_offset`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u32,
    pub sea_level: i32,
    pub detail_noise: NoiseParams,
    pub height_noise: NoiseParams,
    pub height_sample_offset: f32,
    pub height_base_offset: f32,
    pub detail_amplitude: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            seed: 0,
            sea_level: 5,
            detail_noise: NoiseParams::new(0.11, 1),
            height_noise: NoiseParams::new(0.03, 3),
            height_sample_offset: 9000.0,
            height_base_offset: 10.0,
            detail_amplitude: 4.0,
        }
    }
}

/// Mesh appearance settings.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Alpha of water faces. Anything below 1 emits water in the RGBA path.
    pub water_alpha: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        MeshConfig { water_alpha: 1.0 }
    }
}

/// How chunk cells are filled.
///
/// Only `Terrain` is used for real worlds, the others are debugging patterns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    #[default]
    Terrain,
    Solid,
    Checkerboard,
    Empty,
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub world: WorldExtent,
    pub chunk: ChunkExtents,
    pub terrain: TerrainConfig,
    pub mesh: MeshConfig,
    pub generation_method: GenerationMethod,
    /// Worker threads for the pipeline. 0 picks the available parallelism.
    pub worker_count: usize,
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.max_chunks_x == 0 || self.world.max_chunks_y == 0 {
            return Err(ConfigError::invalid("world", "grid must have at least one slot"));
        }
        if i32::try_from(self.world.max_chunks_x).is_err()
            || i32::try_from(self.world.max_chunks_y).is_err()
        {
            return Err(ConfigError::invalid("world", "grid extent does not fit in i32"));
        }
        let ChunkExtents { sx, sy, sz } = self.chunk;
        if sx == 0 || sy == 0 || sz == 0 {
            return Err(ConfigError::invalid("chunk", "extents must be non-zero"));
        }
        if [sx, sy, sz].into_iter().any(|s| i32::try_from(s).is_err()) {
            return Err(ConfigError::invalid("chunk", "extents do not fit in i32"));
        }
        if sx.checked_mul(sy).and_then(|n| n.checked_mul(sz)).is_none() {
            return Err(ConfigError::invalid("chunk", "chunk volume overflows usize"));
        }
        let span_x = self.world.max_chunks_x.checked_mul(sx);
        let span_y = self.world.max_chunks_y.checked_mul(sy);
        if [span_x, span_y]
            .into_iter()
            .any(|span| span.and_then(|n| i32::try_from(n).ok()).is_none())
        {
            return Err(ConfigError::invalid("world", "world span in cells does not fit in i32"));
        }
        for (field, noise) in [
            ("terrain.detail_noise", self.terrain.detail_noise),
            ("terrain.height_noise", self.terrain.height_noise),
        ] {
            if noise.octaves == 0 {
                return Err(ConfigError::invalid(field, "octaves must be at least 1"));
            }
            if !(noise.frequency.is_finite() && noise.frequency > 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("frequency must be positive, got {}", noise.frequency),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.mesh.water_alpha) {
            return Err(ConfigError::invalid(
                "mesh.water_alpha",
                format!("must be within [0, 1], got {}", self.mesh.water_alpha),
            ));
        }
        Ok(())
    }

    /// Worker count with 0 resolved to the machine's parallelism.
    pub fn resolved_worker_count(&self) -> usize {
        if self.worker_count > 0 {
            return self.worker_count;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
