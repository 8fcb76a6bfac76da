//! # Voxel Storage and Generation
//!
//! This module contains the data side of the engine: what a cell is, how
//! cells are grouped into chunks, how chunks are arranged in the world grid,
//! and how terrain fills them.
//!
//! ## Architecture
//!
//! * **Voxel**: one-byte cell, its material enum and the six face directions
//! * **Chunk**: fixed-size 3D array of voxels plus its cached mesh
//! * **World**: 2D grid of chunk slots and global coordinate mapping
//! * **Terrain**: noise source and the height-field generator
//! * **Tasks**: chunk generation as a unit of work for the task manager
//!
//! ## Data Flow
//!
//! 1. The terrain generator produces chunk values, one per grid slot
//! 2. Chunks are inserted into the world grid
//! 3. The mesher reads the grid (never a chunk alone) so that faces on chunk
//!    borders see their neighbours
//! 4. Meshes are cached on the chunks until explicitly rebuilt

pub mod chunk;
pub mod tasks;
pub mod terrain;
pub mod voxel;
pub mod world;
