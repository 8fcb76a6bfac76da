#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The core of a voxel engine: chunked voxel storage, procedural terrain from
//! layered Perlin noise, and a face-culling mesher that turns the world into
//! flat-shaded vertex and index buffers.
//!
//! ## Key Modules
//!
//! * `config` - Construction-time configuration, loadable from JSON
//! * `core` - Concurrency primitives shared with the worker threads
//! * `engine_state` - Voxels, chunks, the world grid, terrain, meshing and the
//!   worker pipeline
//!
//! ## Architecture
//!
//! The crate never touches a graphics device. A renderer reads each chunk's
//! cached mesh (vertex and index bytes) and re-uploads whenever the mesh
//! revision changes.
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::{config::WorldConfig, engine_state::pipeline::WorldPipeline};
//!
//! let world = WorldPipeline::new(&WorldConfig::default())
//!     .run_to_completion()
//!     .unwrap();
//! for chunk in world.chunks() {
//!     let mesh = &chunk.mesh().unwrap().mesh;
//!     println!("{:?}: {} quads", chunk.position(), mesh.quad_count());
//! }
//! ```

use log::info;
use thiserror::Error;
use web_time::Instant;

pub mod args;
pub mod config;
pub mod core;
pub mod engine_state;

pub use args::Cli;
pub use config::{ConfigError, WorldConfig};
pub use engine_state::{
    meshing::{ChunkMesher, Mesh, MeshBuilder, Vertex},
    pipeline::{build_sequential, WorldPipeline, WorldStats},
    voxels::{
        chunk::Chunk,
        terrain::{NoiseSource, TerrainGenerator},
        voxel::{face_direction::FaceDirection, material::Material, Voxel},
        world::{VoxelLookup, WorldError, WorldGrid},
    },
};

/// Anything that stops `run`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Initialises `env_logger` from `RUST_LOG`, writing to stdout.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
}

/// Builds and meshes the world described by the command line.
pub fn run(cli: &Cli) -> Result<WorldStats, RunError> {
    let config = cli.world_config()?;
    info!(
        "Building a {}x{} world of {}x{}x{} chunks (seed {}, {:?})",
        config.world.max_chunks_x,
        config.world.max_chunks_y,
        config.chunk.sx,
        config.chunk.sy,
        config.chunk.sz,
        config.terrain.seed,
        config.generation_method
    );

    let start = Instant::now();
    let world = if cli.single_threaded {
        build_sequential(&config)?
    } else {
        WorldPipeline::new(&config).run_to_completion()?
    };

    let stats = WorldStats::of(&world);
    info!(
        "Built {} chunks ({} free slots) in {:?}: {} occupied voxels, {} quads, {} vertices, {} indices",
        stats.chunks,
        stats.free_slots,
        start.elapsed(),
        stats.occupied_voxels,
        stats.quads,
        stats.vertices,
        stats.indices
    );
    Ok(stats)
}
