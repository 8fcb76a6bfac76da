//! # Engine State Module
//!
//! The core of the voxel world: storage, generation, meshing and the worker
//! pipeline that ties them together.
//!
//! ## Key Components
//!
//! * `voxels` - Voxel cells, chunks, the world grid and terrain generation
//! * `meshing` - Turns chunks into vertex and index buffers
//! * `task_management` - Worker threads and the task protocol
//! * `pipeline` - Builds a whole world, sequentially or on the workers
//!
//! ## Architecture
//!
//! Data only flows one way: the terrain generator fills chunks, chunks live in
//! the world grid, the mesher reads the grid and the finished mesh is cached
//! on its chunk with a revision number. The renderer is an external consumer
//! that watches revisions and re-uploads; nothing here touches a graphics
//! device.

pub mod meshing;
pub mod pipeline;
pub mod task_management;
pub mod voxels;
