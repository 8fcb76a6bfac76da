//! # Material Module
//!
//! This module defines the materials a voxel cell can hold and the conversions
//! between the compact on-disk id and the rich enum type.

use num_derive::FromPrimitive;

use super::MaterialId;

/// Enumerates every material the terrain generator can produce.
///
/// The discriminants are the raw ids stored in chunk cells. Ids outside this
/// set can still live in a cell (they are written verbatim by `Chunk::set`),
/// they just have no `Material` and are rendered in the fallback color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Material {
    /// Nothing. Faces next to an empty cell are visible.
    Empty = 0,

    /// The thin surface layer of a column (dirt sides, grass top).
    Stone = 1,

    /// Deep material under the surface layer.
    Hard = 2,

    /// Fills every cell between the terrain surface and sea level.
    Water = 3,
}

impl Material {
    /// Converts a raw cell id into a `Material`.
    ///
    /// # Returns
    /// `None` for ids the engine does not know about.
    pub fn from_id(id: MaterialId) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(id)
    }

    /// The raw id stored in chunk cells for this material.
    pub fn id(self) -> MaterialId {
        self as MaterialId
    }

    /// Whether this material occupies its cell.
    pub fn is_solid(self) -> bool {
        self != Material::Empty
    }

    /// All known materials in id order.
    pub fn all() -> [Material; 4] {
        [
            Material::Empty,
            Material::Stone,
            Material::Hard,
            Material::Water,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for material in Material::all() {
            assert_eq!(Material::from_id(material.id()), Some(material));
        }
    }

    #[test]
    fn unknown_ids_have_no_material() {
        assert_eq!(Material::from_id(4), None);
        assert_eq!(Material::from_id(u8::MAX), None);
    }

    #[test]
    fn reference_ids() {
        assert_eq!(Material::Empty.id(), 0);
        assert_eq!(Material::Stone.id(), 1);
        assert_eq!(Material::Hard.id(), 2);
        assert_eq!(Material::Water.id(), 3);
    }
}
