//! Background tasks for the meshing system.
//!
//! # Available Tasks
//! - `ChunkMeshGenerationTask`: Builds the mesh of one chunk

pub mod chunk_mesh_generation_task;
