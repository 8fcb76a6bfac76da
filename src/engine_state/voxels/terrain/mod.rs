//! # Terrain Module
//!
//! Procedural filling of chunks.
//!
//! Terrain is a single height field: every column gets one height from two
//! noise samples, then cells are layered bottom to top as deep material,
//! one surface layer, water up to sea level, and air. There are no caves or
//! overhangs, and no column depends on any other, so chunks can be generated
//! in any order and on any thread.

use cgmath::Point2;
use log::debug;
use web_time::Instant;

use super::chunk::{chunk_creation::ChunkCreationIterator, Chunk};
use super::voxel::material::Material;
use crate::config::{ChunkExtents, GenerationMethod, TerrainConfig, WorldConfig};

pub mod noise_source;

pub use noise_source::NoiseSource;

/// Fills chunks from terrain noise (or a debug pattern).
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: NoiseSource,
    config: TerrainConfig,
    extents: ChunkExtents,
    method: GenerationMethod,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig, extents: ChunkExtents, method: GenerationMethod) -> Self {
        TerrainGenerator {
            noise: NoiseSource::new(config.seed),
            config,
            extents,
            method,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.terrain, config.chunk, config.generation_method)
    }

    pub fn extents(&self) -> ChunkExtents {
        self.extents
    }

    /// Terrain surface height of the global column `(x, y)`.
    pub fn column_height(&self, x: i32, y: i32) -> f32 {
        let TerrainConfig {
            detail_noise,
            height_noise,
            height_sample_offset,
            height_base_offset,
            detail_amplitude,
            ..
        } = self.config;

        let secondary = self
            .noise
            .perlin2d(x as f32, y as f32, detail_noise.frequency, detail_noise.octaves);
        let base = self.noise.perlin2d(
            x as f32 + height_sample_offset,
            y as f32,
            height_noise.frequency,
            height_noise.octaves,
        ) * self.extents.sz as f32;

        base - height_base_offset + secondary * detail_amplitude
    }

    /// Material of the cell at height `z` in a column whose surface is at
    /// `height`.
    pub fn material_at(&self, z: i32, height: f32) -> Material {
        let zf = z as f32;
        if zf <= height - 1.0 {
            Material::Hard
        } else if zf <= height {
            Material::Stone
        } else if z <= self.config.sea_level {
            Material::Water
        } else {
            Material::Empty
        }
    }

    /// Generates the chunk at `position` with the configured method.
    pub fn generate_chunk(&self, position: Point2<i32>) -> Chunk {
        match self.method {
            GenerationMethod::Terrain => self.terrain_chunk(position),
            GenerationMethod::Solid => Chunk::solid(position, self.extents, Material::Hard),
            GenerationMethod::Checkerboard => Chunk::checkerboard(position, self.extents),
            GenerationMethod::Empty => Chunk::empty(position, self.extents),
        }
    }

    fn terrain_chunk(&self, position: Point2<i32>) -> Chunk {
        let start = Instant::now();
        let ChunkExtents { sx, sy, sz } = self.extents;
        let base_x = position.x * sx as i32;
        let base_y = position.y * sy as i32;

        let mut heights = Vec::with_capacity(self.extents.plane_size());
        for y in 0..sy as i32 {
            for x in 0..sx as i32 {
                heights.push(self.column_height(base_x + x, base_y + y));
            }
        }

        let mut cci = ChunkCreationIterator::new(position, self.extents);
        for z in 0..sz as i32 {
            for height in &heights {
                cci.push_material(self.material_at(z, *height));
            }
        }

        debug!(
            "Generated chunk ({}, {}) in {:?}",
            position.x,
            position.y,
            start.elapsed()
        );
        cci.return_chunk()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::voxel::Voxel;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(
            TerrainConfig::default(),
            ChunkExtents::default(),
            GenerationMethod::Terrain,
        )
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generator();
        let b = generator();
        for position in [Point2::new(0, 0), Point2::new(3, 7), Point2::new(63, 63)] {
            assert_eq!(
                a.generate_chunk(position).cells(),
                b.generate_chunk(position).cells()
            );
        }
    }

    #[test]
    fn layering_follows_the_height_rule() {
        let generator = generator();
        assert_eq!(generator.material_at(0, 3.5), Material::Hard);
        assert_eq!(generator.material_at(2, 3.0), Material::Hard);
        assert_eq!(generator.material_at(3, 3.5), Material::Stone);
        assert_eq!(generator.material_at(3, 3.0), Material::Stone);
        assert_eq!(generator.material_at(4, 3.5), Material::Water);
        assert_eq!(generator.material_at(5, 3.5), Material::Water);
        assert_eq!(generator.material_at(6, 3.5), Material::Empty);
        assert_eq!(generator.material_at(10, 12.2), Material::Hard);
        assert_eq!(generator.material_at(12, 12.2), Material::Stone);
        assert_eq!(generator.material_at(13, 12.2), Material::Empty);
    }

    #[test]
    fn chunk_columns_match_column_height() {
        let generator = generator();
        let extents = generator.extents();
        let position = Point2::new(2, 5);
        let chunk = generator.generate_chunk(position);
        for y in 0..extents.sy {
            for x in 0..extents.sx {
                let height = generator.column_height(
                    position.x * extents.sx as i32 + x as i32,
                    position.y * extents.sy as i32 + y as i32,
                );
                for z in 0..extents.sz {
                    assert_eq!(
                        chunk.get(Point3::new(x, y, z)),
                        Voxel::new(generator.material_at(z as i32, height))
                    );
                }
            }
        }
    }

    #[test]
    fn columns_have_no_overhangs() {
        let generator = generator();
        let chunk = generator.generate_chunk(Point2::new(1, 1));
        let extents = chunk.extents();
        for y in 0..extents.sy {
            for x in 0..extents.sx {
                let mut seen_empty = false;
                for z in 0..extents.sz {
                    let voxel = chunk.get(Point3::new(x, y, z));
                    if voxel.is_empty() {
                        seen_empty = true;
                    } else {
                        assert!(!seen_empty, "solid above air at ({x}, {y}, {z})");
                    }
                }
            }
        }
    }

    #[test]
    fn water_never_rises_above_sea_level() {
        let generator = generator();
        let chunk = generator.generate_chunk(Point2::new(4, 2));
        for (position, voxel) in chunk.occupied_voxels() {
            if voxel.material() == Some(Material::Water) {
                assert!(position.z <= 5);
            }
        }
    }

    #[test]
    fn debug_methods() {
        let extents = ChunkExtents::new(2, 2, 2);
        let solid = TerrainGenerator::new(TerrainConfig::default(), extents, GenerationMethod::Solid)
            .generate_chunk(Point2::new(0, 0));
        assert_eq!(solid.occupied_count(), 8);
        let empty = TerrainGenerator::new(TerrainConfig::default(), extents, GenerationMethod::Empty)
            .generate_chunk(Point2::new(0, 0));
        assert!(empty.is_all_empty());
        let checker =
            TerrainGenerator::new(TerrainConfig::default(), extents, GenerationMethod::Checkerboard)
                .generate_chunk(Point2::new(0, 0));
        assert_eq!(checker.occupied_count(), 4);
    }
}
