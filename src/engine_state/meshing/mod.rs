//! Mesh generation for voxel chunks.
//!
//! This module turns chunk cells into flat-shaded triangle meshes that a
//! renderer can upload without further processing.
//!
//! # Architecture
//! - `ChunkMesher`: Face-culling mesher, one quad per exposed face
//! - `MeshBuilder`: Append-only quad accumulator
//! - `Mesh`: Finished vertex and index buffers
//! - `Palette`: Material colors, grass tint and directional shading
//! - `Vertex`: Plain-old-data vertex layout
//! - `tasks/`: Meshing as a task for the worker pool
//!
//! # Coordinate Spaces
//! Cells are stored with `z` vertical. Meshes are emitted in render space with
//! `y` vertical; [`to_render_space`] is the only place that swaps the axes.

pub mod chunk_mesher;
pub mod mesh_builder;
pub mod palette;
pub mod tasks;
pub mod vertex;

pub use chunk_mesher::{to_render_space, ChunkMesher};
pub use mesh_builder::{Mesh, MeshBuilder};
pub use palette::Palette;
pub use vertex::Vertex;
