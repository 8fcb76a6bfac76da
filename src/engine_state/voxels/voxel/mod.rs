//! # Voxel Module
//!
//! The single-cell data type stored in chunks, plus the material enum and the
//! six face directions used by the mesher.

use material::Material;

pub mod face_direction;
pub mod material;

/// The underlying integer type used to store a material in a cell.
pub type MaterialId = u8;

/// A single voxel cell.
///
/// Stored as the raw material id so that unknown ids written by a caller are
/// preserved exactly. `#[repr(C)]` keeps the layout a single byte, so whole
/// cell arrays can be viewed as bytes.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Hash, Default)]
pub struct Voxel {
    /// The material of this cell, encoded as a `MaterialId`.
    pub material_id: MaterialId,
}

impl Voxel {
    /// The empty cell. Also what every unresolvable world query returns.
    pub const EMPTY: Voxel = Voxel { material_id: 0 };

    /// Creates a new voxel of the given material.
    pub fn new(material: Material) -> Self {
        Voxel {
            material_id: material.id(),
        }
    }

    /// Creates a voxel from a raw id, known or not.
    pub fn from_id(material_id: MaterialId) -> Self {
        Voxel { material_id }
    }

    /// The material of this cell, or `None` for an unknown id.
    pub fn material(&self) -> Option<Material> {
        Material::from_id(self.material_id)
    }

    /// Whether the cell is empty. Unknown ids count as occupied.
    pub fn is_empty(&self) -> bool {
        self.material_id == Material::Empty.id()
    }
}

impl From<Material> for Voxel {
    fn from(material: Material) -> Self {
        Voxel::new(material)
    }
}
