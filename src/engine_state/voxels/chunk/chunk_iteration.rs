//! # Chunk Iteration Module
//!
//! Iteration over the occupied cells of a chunk in storage order.

use cgmath::Point3;

use crate::engine_state::voxels::voxel::Voxel;

use super::Chunk;

/// Iterator over every non-empty cell of a chunk and its local coordinate.
///
/// Cells with unknown material ids are occupied and are yielded too.
pub struct OccupiedVoxelIterator<'a> {
    chunk_ref: &'a Chunk,
    /// Next linear index to inspect
    offset: usize,
}

impl<'a> OccupiedVoxelIterator<'a> {
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        OccupiedVoxelIterator {
            chunk_ref,
            offset: 0,
        }
    }

    fn local_of(&self, offset: usize) -> Point3<usize> {
        let extents = self.chunk_ref.extents();
        Point3::new(
            offset % extents.sx,
            (offset / extents.sx) % extents.sy,
            offset / extents.plane_size(),
        )
    }
}

impl Iterator for OccupiedVoxelIterator<'_> {
    type Item = (Point3<usize>, Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.chunk_ref.cells();
        while self.offset < cells.len() {
            let offset = self.offset;
            self.offset += 1;
            let voxel = cells[offset];
            if !voxel.is_empty() {
                return Some((self.local_of(offset), voxel));
            }
        }
        None
    }
}
