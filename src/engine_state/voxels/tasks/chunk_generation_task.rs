//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which fills one chunk on a
//! worker thread. The worker only builds the chunk value; inserting it into the
//! world and deciding which meshes can now be built happens on the owning
//! thread.

use cgmath::Point2;
use log::warn;

use crate::engine_state::{
    meshing::tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask,
    task_management::task::{Task, TaskContext, TaskResult},
    voxels::{chunk::Chunk, terrain::TerrainGenerator},
};

/// Generates the chunk at one grid position.
pub struct ChunkGenerationTask {
    generator: TerrainGenerator,
    /// The position of the chunk to generate (in chunk coordinates)
    position: Point2<i32>,
}

impl ChunkGenerationTask {
    pub fn new(generator: TerrainGenerator, position: Point2<i32>) -> Self {
        ChunkGenerationTask {
            generator,
            position,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        Box::new(ChunkGenerationTaskResult {
            chunk: self.generator.generate_chunk(self.position),
        })
    }
}

/// A freshly generated chunk on its way into the world.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the chunk and schedules meshing for every chunk whose
    /// neighbourhood is now complete.
    fn handle_result(self: Box<Self>, context: &TaskContext) -> Vec<Box<dyn Task + Send>> {
        let position = self.chunk.position();

        if let Err(err) = context.world.get_mut().insert_chunk(self.chunk) {
            warn!("Dropping generated chunk: {}", err);
            return Vec::new();
        }

        let ready = context.schedule.get_mut().mark_generated(position);
        ready
            .into_iter()
            .map(|coord| -> Box<dyn Task + Send> {
                Box::new(ChunkMeshGenerationTask::new(
                    context.world.clone(),
                    context.mesher,
                    coord,
                ))
            })
            .collect()
    }
}
