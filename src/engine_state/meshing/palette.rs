//! Face colors.
//!
//! Colors are flat per quad: a base color per material, replaced by grass on
//! the top of surface cells, multiplied by the face's shading factor.

use cgmath::Vector3;

use crate::config::MeshConfig;
use crate::engine_state::voxels::voxel::{face_direction::FaceDirection, material::Material, Voxel};

const fn rgb(r: f32, g: f32, b: f32) -> Vector3<f32> {
    Vector3 { x: r, y: g, z: b }
}

pub const HARD: Vector3<f32> = rgb(120.0 / 256.0, 120.0 / 256.0, 120.0 / 256.0);
pub const DIRT: Vector3<f32> = rgb(115.0 / 256.0, 63.0 / 256.0, 23.0 / 256.0);
pub const WATER: Vector3<f32> = rgb(100.0 / 256.0, 110.0 / 256.0, 220.0 / 256.0);
pub const GRASS_LIGHT: Vector3<f32> = rgb(0.1, 0.9, 0.1);
pub const GRASS_DARK: Vector3<f32> = rgb(0.05, 0.8, 0.05);
/// Anything without a known material.
pub const UNKNOWN: Vector3<f32> = rgb(1.0, 0.0, 1.0);

/// Maps a voxel face to its color and alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    water_alpha: f32,
}

impl Palette {
    pub fn new(config: &MeshConfig) -> Self {
        Palette {
            water_alpha: config.water_alpha,
        }
    }

    /// Unshaded color of a material.
    pub fn base_color(material: Option<Material>) -> Vector3<f32> {
        match material {
            Some(Material::Hard) => HARD,
            Some(Material::Stone) => DIRT,
            Some(Material::Water) => WATER,
            Some(Material::Empty) | None => UNKNOWN,
        }
    }

    /// Grass tint of the column `(x, y)`, alternating like a checkerboard.
    pub fn grass(x: i32, y: i32) -> Vector3<f32> {
        if (x & 1) ^ (y & 1) == 0 {
            GRASS_LIGHT
        } else {
            GRASS_DARK
        }
    }

    /// Shaded color of the `direction` face of `voxel` in column `(x, y)`.
    pub fn face_color(&self, voxel: Voxel, direction: FaceDirection, x: i32, y: i32) -> Vector3<f32> {
        let material = voxel.material();
        let color = if direction.is_top() && material == Some(Material::Stone) {
            Self::grass(x, y)
        } else {
            Self::base_color(material)
        };
        color * direction.shading()
    }

    pub fn alpha(&self, voxel: Voxel) -> f32 {
        match voxel.material() {
            Some(Material::Water) => self.water_alpha,
            _ => 1.0,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(&MeshConfig::default())
    }
}
