//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size 3D block of voxel
//! cells, the unit of storage, generation and meshing.
//!
//! ## Storage
//!
//! Cells are stored densely, one byte each, in x-fastest order:
//! `index = x + y * sx + z * sx * sy`. The vertical axis is `z`.
//!
//! ## Mesh Cache
//!
//! A chunk also owns the last mesh built for it. The cache is filled lazily by
//! the world grid and is only replaced by an explicit rebuild: writing cells
//! does not invalidate it. Every stored mesh gets a new revision number, which
//! is what a renderer compares against to decide whether to re-upload.

use cgmath::{Point2, Point3};
use chunk_creation::ChunkCreationIterator;

use super::voxel::{material::Material, Voxel};
use crate::config::ChunkExtents;
use crate::engine_state::meshing::Mesh;

pub mod chunk_creation;
pub mod chunk_iteration;

use chunk_iteration::OccupiedVoxelIterator;

/// A mesh cached on a chunk together with the revision it was stored at.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub mesh: Mesh,
    /// Starts at 1 for the first build and increases with every rebuild.
    pub revision: u64,
}

/// A fixed-size block of voxel cells at a chunk coordinate.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Position in chunk coordinates (not cell coordinates). Never changes.
    position: Point2<i32>,
    extents: ChunkExtents,
    cells: Vec<Voxel>,
    mesh: Option<ChunkMesh>,
    mesh_revision: u64,
}

impl Chunk {
    pub(crate) fn from_cells(position: Point2<i32>, extents: ChunkExtents, cells: Vec<Voxel>) -> Self {
        debug_assert_eq!(cells.len(), extents.volume());
        Chunk {
            position,
            extents,
            cells,
            mesh: None,
            mesh_revision: 0,
        }
    }

    /// Creates a chunk where every cell is empty.
    pub fn empty(position: Point2<i32>, extents: ChunkExtents) -> Self {
        Self::solid(position, extents, Material::Empty)
    }

    /// Creates a chunk where every cell holds `material`.
    pub fn solid(position: Point2<i32>, extents: ChunkExtents, material: Material) -> Self {
        Self::from_cells(position, extents, vec![Voxel::new(material); extents.volume()])
    }

    /// Creates a chunk with a 3D checkerboard of `Hard` and empty cells.
    ///
    /// The pattern is keyed on global cell parity so it continues seamlessly
    /// across chunk borders.
    pub fn checkerboard(position: Point2<i32>, extents: ChunkExtents) -> Self {
        let mut cci = ChunkCreationIterator::new(position, extents);
        let base_x = position.x as i64 * extents.sx as i64;
        let base_y = position.y as i64 * extents.sy as i64;

        for z in 0..extents.sz as i64 {
            for y in 0..extents.sy as i64 {
                for x in 0..extents.sx as i64 {
                    if (base_x + x + base_y + y + z).rem_euclid(2) == 0 {
                        cci.push_material(Material::Hard);
                    } else {
                        cci.push_material(Material::Empty);
                    }
                }
            }
        }

        cci.return_chunk()
    }

    /// The chunk coordinate this chunk was created at.
    pub fn position(&self) -> Point2<i32> {
        self.position
    }

    pub fn extents(&self) -> ChunkExtents {
        self.extents
    }

    /// Global cell coordinate of local cell `(0, 0, 0)`.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * self.extents.sx as i32,
            self.position.y * self.extents.sy as i32,
            0,
        )
    }

    /// Linear index of a local coordinate.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the chunk.
    #[inline]
    pub fn idx(&self, local: Point3<usize>) -> usize {
        let ChunkExtents { sx, sy, sz } = self.extents;
        assert!(
            local.x < sx && local.y < sy && local.z < sz,
            "local coordinate {:?} outside chunk extents {}x{}x{}",
            local,
            sx,
            sy,
            sz
        );
        local.x + local.y * sx + local.z * sx * sy
    }

    /// Reads the cell at a local coordinate.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the chunk.
    #[inline]
    pub fn get(&self, local: Point3<usize>) -> Voxel {
        self.cells[self.idx(local)]
    }

    /// Writes the cell at a local coordinate.
    ///
    /// The cached mesh is left untouched; call the world grid's rebuild to
    /// bring it up to date.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the chunk.
    #[inline]
    pub fn set(&mut self, local: Point3<usize>, voxel: Voxel) {
        let idx = self.idx(local);
        self.cells[idx] = voxel;
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    /// Iterates over the occupied cells with their local coordinates.
    pub fn occupied_voxels(&self) -> OccupiedVoxelIterator<'_> {
        OccupiedVoxelIterator::new(self)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|voxel| !voxel.is_empty()).count()
    }

    pub fn is_all_empty(&self) -> bool {
        self.cells.iter().all(Voxel::is_empty)
    }

    /// The cached mesh, if one has been built.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Replaces the cached mesh and returns its new revision.
    pub fn store_mesh(&mut self, mesh: Mesh) -> u64 {
        self.mesh_revision += 1;
        self.mesh = Some(ChunkMesh {
            mesh,
            revision: self.mesh_revision,
        });
        self.mesh_revision
    }

    /// Drops the cached mesh. The revision counter keeps counting.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extents() -> ChunkExtents {
        ChunkExtents::new(8, 8, 32)
    }

    #[test]
    fn empty_chunk_has_no_occupied_cells() {
        let chunk = Chunk::empty(Point2::new(0, 0), extents());
        assert_eq!(chunk.cells().len(), 8 * 8 * 32);
        assert!(chunk.is_all_empty());
        assert_eq!(chunk.occupied_count(), 0);
    }

    #[test]
    fn solid_chunk_is_full() {
        let chunk = Chunk::solid(Point2::new(2, 3), extents(), Material::Hard);
        assert_eq!(chunk.occupied_count(), extents().volume());
        assert_eq!(chunk.get(Point3::new(7, 7, 31)), Voxel::new(Material::Hard));
        assert_eq!(chunk.origin(), Point3::new(16, 24, 0));
    }

    #[test]
    fn storage_order_is_x_fastest() {
        let chunk = Chunk::empty(Point2::new(0, 0), extents());
        assert_eq!(chunk.idx(Point3::new(1, 0, 0)), 1);
        assert_eq!(chunk.idx(Point3::new(0, 1, 0)), 8);
        assert_eq!(chunk.idx(Point3::new(0, 0, 1)), 64);
    }

    #[test]
    fn checkerboard_alternates() {
        let chunk = Chunk::checkerboard(Point2::new(1, 0), ChunkExtents::new(2, 2, 2));
        let a = chunk.get(Point3::new(0, 0, 0));
        let b = chunk.get(Point3::new(1, 0, 0));
        let c = chunk.get(Point3::new(1, 1, 0));
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(chunk.occupied_count(), 4);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_get_panics() {
        let chunk = Chunk::empty(Point2::new(0, 0), extents());
        chunk.get(Point3::new(8, 0, 0));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_set_panics() {
        let mut chunk = Chunk::empty(Point2::new(0, 0), extents());
        chunk.set(Point3::new(0, 0, 32), Voxel::new(Material::Hard));
    }

    #[test]
    fn setting_cells_keeps_the_cached_mesh() {
        let mut chunk = Chunk::empty(Point2::new(0, 0), extents());
        assert_eq!(chunk.store_mesh(Mesh::default()), 1);
        chunk.set(Point3::new(0, 0, 0), Voxel::new(Material::Stone));
        assert_eq!(chunk.mesh().map(|m| m.revision), Some(1));
        assert_eq!(chunk.store_mesh(Mesh::default()), 2);
        chunk.clear_mesh();
        assert!(chunk.mesh().is_none());
        assert_eq!(chunk.store_mesh(Mesh::default()), 3);
    }

    fn dim() -> impl Strategy<Value = usize> {
        1usize..=8
    }

    proptest! {
        // set then get returns the written value, including unknown ids
        #[test]
        fn set_get_round_trip(sx in dim(), sy in dim(), sz in dim(), seed in any::<u64>(), id in any::<u8>()) {
            let extents = ChunkExtents::new(sx, sy, sz);
            let mut chunk = Chunk::empty(Point2::new(0, 0), extents);
            let local = Point3::new(
                (seed % sx as u64) as usize,
                ((seed / 8) % sy as u64) as usize,
                ((seed / 64) % sz as u64) as usize,
            );
            chunk.set(local, Voxel::from_id(id));
            prop_assert_eq!(chunk.get(local), Voxel::from_id(id));
        }

        // idx maps each local coordinate to a unique in-range index
        #[test]
        fn idx_is_unique_and_in_range(sx in dim(), sy in dim(), sz in dim()) {
            let extents = ChunkExtents::new(sx, sy, sz);
            let chunk = Chunk::empty(Point2::new(0, 0), extents);
            let mut seen = vec![false; extents.volume()];
            for z in 0..sz { for y in 0..sy { for x in 0..sx {
                let i = chunk.idx(Point3::new(x, y, z));
                prop_assert!(i < extents.volume());
                prop_assert!(!seen[i]);
                seen[i] = true;
            }}}
            prop_assert!(seen.into_iter().all(|b| b));
        }
    }
}
