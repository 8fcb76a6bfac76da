//! # Chunk Creation Module
//!
//! A builder that fills a chunk one cell at a time in storage order
//! (x fastest, then y, then z). Generators that naturally walk a chunk in that
//! order push cells here instead of computing indices themselves.

use cgmath::{Point2, Point3};

use crate::config::ChunkExtents;
use crate::engine_state::voxels::voxel::{material::Material, Voxel};

use super::Chunk;

/// Builds a [`Chunk`] by pushing cells in storage order.
pub struct ChunkCreationIterator {
    /// The chunk coordinate of the chunk being created
    position: Point2<i32>,
    extents: ChunkExtents,
    cells: Vec<Voxel>,
    /// Local coordinate the next pushed cell lands on
    local_x: usize,
    local_y: usize,
    local_z: usize,
}

impl ChunkCreationIterator {
    /// Creates a new builder for a chunk at `position`.
    pub fn new(position: Point2<i32>, extents: ChunkExtents) -> Self {
        ChunkCreationIterator {
            position,
            extents,
            cells: Vec::with_capacity(extents.volume()),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Local coordinate the next pushed cell will be written to, or `None`
    /// once the chunk is full.
    pub fn next_position(&self) -> Option<Point3<usize>> {
        if self.is_full() {
            return None;
        }
        Some(Point3::new(self.local_x, self.local_y, self.local_z))
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() == self.extents.volume()
    }

    /// Appends a cell at the current position and advances.
    ///
    /// # Panics
    /// Panics if the chunk is already full.
    pub fn push_voxel(&mut self, voxel: Voxel) {
        assert!(!self.is_full(), "pushed past the end of the chunk");
        self.cells.push(voxel);

        self.local_x += 1;
        if self.local_x == self.extents.sx {
            self.local_x = 0;
            self.local_y += 1;
            if self.local_y == self.extents.sy {
                self.local_y = 0;
                self.local_z += 1;
            }
        }
    }

    pub fn push_material(&mut self, material: Material) {
        self.push_voxel(Voxel::new(material));
    }

    /// Finalizes the chunk.
    ///
    /// # Panics
    /// Panics if fewer cells were pushed than the chunk holds.
    pub fn return_chunk(self) -> Chunk {
        assert!(
            self.is_full(),
            "chunk {:?} finished with {} of {} cells",
            self.position,
            self.cells.len(),
            self.extents.volume()
        );
        Chunk::from_cells(self.position, self.extents, self.cells)
    }
}
