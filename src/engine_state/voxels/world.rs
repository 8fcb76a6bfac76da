//! # World Module
//!
//! This module provides the `WorldGrid`: a fixed 2D array of chunk slots
//! covering the whole world, and the mapping between global cell coordinates
//! and (chunk, local) coordinates.
//!
//! ## Boundary Policy
//!
//! The world has a hard edge and is surrounded by void. Any query that does
//! not land in an allocated chunk (outside the grid, below `z = 0`, at or
//! above `z = sz`, or into a free slot) reads as [`Voxel::EMPTY`]. That is not
//! an error: the mesher relies on it to draw the outer faces of edge chunks.
//!
//! ## Coordinates
//!
//! Chunk coordinates use floor division and local coordinates the matching
//! Euclidean remainder, so negative global coordinates map to negative chunk
//! coordinates (which are then outside the grid) instead of aliasing chunk 0.

use cgmath::{Point2, Point3};
use log::{debug, info};
use thiserror::Error;
use web_time::Instant;

use super::chunk::{Chunk, ChunkMesh};
use super::terrain::TerrainGenerator;
use super::voxel::Voxel;
use crate::config::{ChunkExtents, WorldConfig, WorldExtent};
use crate::engine_state::meshing::{ChunkMesher, Mesh};

/// Errors returned by fallible world grid operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("chunk coordinate ({x}, {y}) is outside the world grid")]
    ChunkOutOfBounds { x: i32, y: i32 },

    #[error("chunk extents {found:?} do not match the grid's {expected:?}")]
    ExtentsMismatch {
        expected: ChunkExtents,
        found: ChunkExtents,
    },

    #[error("global cell ({x}, {y}, {z}) does not resolve to an allocated chunk")]
    Unresolvable { x: i32, y: i32, z: i32 },

    #[error("world build stopped early: {generated} generated and {meshed} meshed of {slots} slots")]
    Incomplete {
        generated: usize,
        meshed: usize,
        slots: usize,
    },
}

/// Read access to voxels by global cell coordinate.
///
/// This is the seam between the mesher and whatever holds the voxels. The
/// world grid is the real implementation; anything else (a test fixture, an
/// editor preview) can stand in for it.
pub trait VoxelLookup {
    /// The voxel at a global coordinate, `Voxel::EMPTY` when unresolvable.
    fn voxel_at(&self, global: Point3<i32>) -> Voxel;
}

/// A fixed 2D grid of chunk slots that owns its chunks.
#[derive(Clone, Debug)]
pub struct WorldGrid {
    extent: WorldExtent,
    chunk_extents: ChunkExtents,
    /// Row-major: slot of chunk (x, y) is `x + y * max_chunks_x`.
    slots: Vec<Option<Chunk>>,
}

impl WorldGrid {
    /// Creates a grid with every slot free.
    pub fn new(extent: WorldExtent, chunk_extents: ChunkExtents) -> Self {
        WorldGrid {
            extent,
            chunk_extents,
            slots: vec![None; extent.slot_count()],
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.world, config.chunk)
    }

    pub fn chunk_extents(&self) -> ChunkExtents {
        self.chunk_extents
    }

    /// Slot index of a chunk coordinate, `None` outside the grid.
    pub fn slot_index(&self, coord: Point2<i32>) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x >= self.extent.max_chunks_x || y >= self.extent.max_chunks_y {
            return None;
        }
        Some(x + y * self.extent.max_chunks_x)
    }

    /// Every chunk coordinate inside the grid, row by row.
    pub fn chunk_coords(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        let max_x = self.extent.max_chunks_x as i32;
        let max_y = self.extent.max_chunks_y as i32;
        (0..max_y).flat_map(move |y| (0..max_x).map(move |x| Point2::new(x, y)))
    }

    /// Chunk coordinate containing a global cell coordinate.
    pub fn chunk_coord_of(&self, global: Point3<i32>) -> Point2<i32> {
        Point2::new(
            global.x.div_euclid(self.chunk_extents.sx as i32),
            global.y.div_euclid(self.chunk_extents.sy as i32),
        )
    }

    /// Local coordinate of a global cell inside its chunk.
    ///
    /// # Returns
    /// `None` when `z` is outside `0..sz`.
    pub fn local_of(&self, global: Point3<i32>) -> Option<Point3<usize>> {
        let z = usize::try_from(global.z)
            .ok()
            .filter(|&z| z < self.chunk_extents.sz)?;
        let local = Point3::new(
            global.x.rem_euclid(self.chunk_extents.sx as i32) as usize,
            global.y.rem_euclid(self.chunk_extents.sy as i32) as usize,
            z,
        );
        debug_assert!(local.x < self.chunk_extents.sx && local.y < self.chunk_extents.sy);
        Some(local)
    }

    /// Inverse of `chunk_coord_of` and `local_of`.
    pub fn global_of(&self, coord: Point2<i32>, local: Point3<usize>) -> Point3<i32> {
        Point3::new(
            coord.x * self.chunk_extents.sx as i32 + local.x as i32,
            coord.y * self.chunk_extents.sy as i32 + local.y as i32,
            local.z as i32,
        )
    }

    /// Slot index and local coordinate of a global cell, if it is inside the
    /// grid and the vertical range. The slot may still be free.
    fn resolve(&self, global: Point3<i32>) -> Option<(usize, Point3<usize>)> {
        let local = self.local_of(global)?;
        let slot = self.slot_index(self.chunk_coord_of(global))?;
        Some((slot, local))
    }

    /// The voxel at a global coordinate. Unresolvable coordinates are empty.
    pub fn cell_at(&self, global: Point3<i32>) -> Voxel {
        match self.resolve(global) {
            Some((slot, local)) => match &self.slots[slot] {
                Some(chunk) => chunk.get(local),
                None => Voxel::EMPTY,
            },
            None => Voxel::EMPTY,
        }
    }

    /// Writes the voxel at a global coordinate.
    ///
    /// Like `Chunk::set`, this does not touch the chunk's cached mesh.
    pub fn set_cell_at(&mut self, global: Point3<i32>, voxel: Voxel) -> Result<(), WorldError> {
        let unresolvable = WorldError::Unresolvable {
            x: global.x,
            y: global.y,
            z: global.z,
        };
        let (slot, local) = self.resolve(global).ok_or_else(|| unresolvable.clone())?;
        match &mut self.slots[slot] {
            Some(chunk) => {
                chunk.set(local, voxel);
                Ok(())
            }
            None => Err(unresolvable),
        }
    }

    /// Places a chunk in the slot named by its own position.
    ///
    /// # Returns
    /// The chunk previously in that slot, if any.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Result<Option<Chunk>, WorldError> {
        if chunk.extents() != self.chunk_extents {
            return Err(WorldError::ExtentsMismatch {
                expected: self.chunk_extents,
                found: chunk.extents(),
            });
        }
        let position = chunk.position();
        let slot = self
            .slot_index(position)
            .ok_or(WorldError::ChunkOutOfBounds {
                x: position.x,
                y: position.y,
            })?;
        Ok(self.slots[slot].replace(chunk))
    }

    pub fn chunk(&self, coord: Point2<i32>) -> Option<&Chunk> {
        self.slots[self.slot_index(coord)?].as_ref()
    }

    pub fn chunk_mut(&mut self, coord: Point2<i32>) -> Option<&mut Chunk> {
        let slot = self.slot_index(coord)?;
        self.slots[slot].as_mut()
    }

    /// All allocated chunks in slot order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.slots.iter().flatten()
    }

    /// Chunk coordinates of the slots that hold no chunk.
    pub fn free_slots(&self) -> Vec<Point2<i32>> {
        self.chunk_coords()
            .filter(|coord| self.chunk(*coord).is_none())
            .collect()
    }

    pub fn allocated_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Generates every slot of the grid on the calling thread.
    pub fn generate(&mut self, generator: &TerrainGenerator) -> Result<(), WorldError> {
        let start = Instant::now();
        let coords: Vec<_> = self.chunk_coords().collect();
        for coord in coords {
            self.insert_chunk(generator.generate_chunk(coord))?;
        }
        info!(
            "Generated {} chunks in {:?}",
            self.allocated_count(),
            start.elapsed()
        );
        Ok(())
    }

    /// The chunk's cached mesh, building it first if it has none.
    ///
    /// # Returns
    /// `None` when the slot holds no chunk.
    pub fn chunk_mesh(&mut self, coord: Point2<i32>, mesher: &ChunkMesher) -> Option<&ChunkMesh> {
        if self.chunk(coord)?.mesh().is_none() {
            self.rebuild_chunk_mesh(coord, mesher)?;
        }
        self.chunk(coord)?.mesh()
    }

    /// Rebuilds the chunk's mesh from scratch and bumps its revision.
    ///
    /// This is the only way cell edits reach the cached mesh.
    pub fn rebuild_chunk_mesh(
        &mut self,
        coord: Point2<i32>,
        mesher: &ChunkMesher,
    ) -> Option<&ChunkMesh> {
        let start = Instant::now();
        let world = &*self;
        let mesh = mesher.mesh_chunk(world.chunk(coord)?, world);
        debug!(
            "Meshed chunk ({}, {}): {} quads in {:?}",
            coord.x,
            coord.y,
            mesh.quad_count(),
            start.elapsed()
        );
        self.store_chunk_mesh(coord, mesh)?;
        self.chunk(coord)?.mesh()
    }

    /// Stores an externally built mesh on a chunk.
    ///
    /// # Returns
    /// The new mesh revision, or `None` when the slot holds no chunk.
    pub fn store_chunk_mesh(&mut self, coord: Point2<i32>, mesh: Mesh) -> Option<u64> {
        Some(self.chunk_mut(coord)?.store_mesh(mesh))
    }
}

impl VoxelLookup for WorldGrid {
    fn voxel_at(&self, global: Point3<i32>) -> Voxel {
        self.cell_at(global)
    }
}
