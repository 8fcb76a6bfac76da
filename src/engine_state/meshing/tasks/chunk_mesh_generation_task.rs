//! Task for building a chunk mesh on a worker thread.
//!
//! The worker holds a read lock on the world while it meshes, so neighbouring
//! chunks are visible across the border. The finished mesh is stored back on
//! the chunk by the result handler, which is the only place a write lock is
//! taken.

use cgmath::Point2;
use log::warn;

use crate::{
    core::MtResource,
    engine_state::{
        meshing::{ChunkMesher, Mesh},
        task_management::task::{Task, TaskContext, TaskResult},
        voxels::world::WorldGrid,
    },
};

/// Meshes one chunk of the world.
pub struct ChunkMeshGenerationTask {
    world: MtResource<WorldGrid>,
    mesher: ChunkMesher,
    position: Point2<i32>,
}

impl ChunkMeshGenerationTask {
    pub fn new(world: MtResource<WorldGrid>, mesher: ChunkMesher, position: Point2<i32>) -> Self {
        ChunkMeshGenerationTask {
            world,
            mesher,
            position,
        }
    }
}

impl Task for ChunkMeshGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let world = self.world.get();
        let mesh = world
            .chunk(self.position)
            .map(|chunk| self.mesher.mesh_chunk(chunk, &*world));

        Box::new(ChunkMeshGenerationTaskResult {
            position: self.position,
            mesh,
        })
    }
}

/// A built mesh, or `None` when the chunk had vanished from the world.
pub struct ChunkMeshGenerationTaskResult {
    position: Point2<i32>,
    mesh: Option<Mesh>,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    fn handle_result(self: Box<Self>, context: &TaskContext) -> Vec<Box<dyn Task + Send>> {
        let ChunkMeshGenerationTaskResult { position, mesh } = *self;
        let stored = mesh.and_then(|mesh| context.world.get_mut().store_chunk_mesh(position, mesh));

        match stored {
            Some(_) => context.schedule.get_mut().mark_meshed(position),
            None => warn!(
                "No chunk at ({}, {}) to store a mesh on",
                position.x, position.y
            ),
        }

        Vec::new()
    }
}
