//! # World Pipeline
//!
//! Builds a whole world: every grid slot generated, every chunk meshed.
//!
//! Two drivers produce the same result:
//!
//! * [`build_sequential`] generates and meshes everything on the calling
//!   thread, in slot order.
//! * [`WorldPipeline`] spreads the same work over the task manager's workers.
//!   Generation tasks are published for every slot up front; whenever a
//!   generated chunk completes a neighbourhood, the [`ChunkSchedule`] releases
//!   the mesh tasks that were waiting on it.
//!
//! Chunks are independent to generate, and a mesh only reads its own chunk
//! plus neighbour border cells, so the order work completes in does not change
//! the output.

use cgmath::Point2;
use log::{debug, info, warn};
use web_time::Instant;

pub mod chunk_schedule;

pub use chunk_schedule::ChunkSchedule;

use crate::{
    config::WorldConfig,
    core::MtResource,
    engine_state::{
        meshing::ChunkMesher,
        task_management::{task::TaskContext, TaskManager},
        voxels::{
            tasks::chunk_generation_task::ChunkGenerationTask,
            terrain::TerrainGenerator,
            world::{WorldError, WorldGrid},
        },
    },
};

/// Totals over a built world, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub chunks: usize,
    pub free_slots: usize,
    pub occupied_voxels: usize,
    pub quads: usize,
    pub vertices: usize,
    pub indices: usize,
}

impl WorldStats {
    pub fn of(world: &WorldGrid) -> Self {
        let mut stats = WorldStats {
            free_slots: world.free_slots().len(),
            ..WorldStats::default()
        };
        for chunk in world.chunks() {
            stats.chunks += 1;
            stats.occupied_voxels += chunk.occupied_count();
            if let Some(chunk_mesh) = chunk.mesh() {
                stats.quads += chunk_mesh.mesh.quad_count();
                stats.vertices += chunk_mesh.mesh.vertices.len();
                stats.indices += chunk_mesh.mesh.indices.len();
            }
        }
        stats
    }
}

/// Generates and meshes the whole world on the calling thread.
pub fn build_sequential(config: &WorldConfig) -> Result<WorldGrid, WorldError> {
    let start = Instant::now();
    let generator = TerrainGenerator::from_config(config);
    let mesher = ChunkMesher::new(&config.mesh);

    let mut world = WorldGrid::from_config(config);
    world.generate(&generator)?;

    let coords: Vec<Point2<i32>> = world.chunk_coords().collect();
    for coord in coords {
        world.rebuild_chunk_mesh(coord, &mesher);
    }

    info!("Built world sequentially in {:?}", start.elapsed());
    Ok(world)
}

/// Builds a world on a pool of worker threads.
pub struct WorldPipeline {
    task_manager: TaskManager,
    world: MtResource<WorldGrid>,
    schedule: MtResource<ChunkSchedule>,
    slots: usize,
}

impl WorldPipeline {
    /// Creates a pipeline with `config.resolved_worker_count()` workers.
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_workers(config, config.resolved_worker_count())
    }

    pub fn with_workers(config: &WorldConfig, num_workers: usize) -> Self {
        let world = MtResource::new(WorldGrid::from_config(config));
        let schedule = MtResource::new(ChunkSchedule::new(config.world));
        let context = TaskContext {
            world: world.clone(),
            schedule: schedule.clone(),
            generator: TerrainGenerator::from_config(config),
            mesher: ChunkMesher::new(&config.mesh),
        };

        WorldPipeline {
            task_manager: TaskManager::new(num_workers, context),
            world,
            schedule,
            slots: config.world.slot_count(),
        }
    }

    pub fn schedule(&self) -> MtResource<ChunkSchedule> {
        self.schedule.clone()
    }

    /// Publishes a generation task for every free slot.
    pub fn publish_generation(&mut self) {
        let coords = self.world.get().free_slots();
        let generator = &self.task_manager.context().generator;
        let tasks: Vec<_> = coords
            .into_iter()
            .map(|coord| ChunkGenerationTask::new(generator.clone(), coord))
            .collect();

        info!("Publishing {} chunk generation tasks", tasks.len());
        for task in tasks {
            self.task_manager.publish_task(Box::new(task));
        }
    }

    /// Handles finished work and feeds idle workers.
    ///
    /// # Returns
    /// The number of task results handled.
    pub fn step(&mut self, blocking: bool) -> usize {
        let handled = self.task_manager.process_completed_tasks(blocking);
        self.task_manager.process_queued_tasks();
        debug!(
            "Handled {} results, {} in flight, {} queued",
            handled,
            self.task_manager.num_tasks_in_flight(),
            self.task_manager.num_queued_tasks()
        );
        handled
    }

    pub fn is_idle(&self) -> bool {
        self.task_manager.is_idle()
    }

    /// Generates and meshes every slot, blocking until the work runs out.
    ///
    /// # Returns
    /// The finished world, or `WorldError::Incomplete` if some slot was not
    /// generated or meshed.
    pub fn run_to_completion(mut self) -> Result<WorldGrid, WorldError> {
        self.publish_generation();
        self.finish()
    }

    /// Drives already published work until it runs out or no worker is left
    /// to run it, then checks that every slot was generated and meshed.
    pub fn finish(mut self) -> Result<WorldGrid, WorldError> {
        let start = Instant::now();
        while !self.is_idle() {
            let handled = self.step(true);
            if handled == 0 && self.task_manager.num_live_workers() == 0 {
                warn!(
                    "No task workers left, abandoning {} queued tasks",
                    self.task_manager.num_queued_tasks()
                );
                break;
            }
        }

        let (generated, meshed) = {
            let schedule = self.schedule.get();
            (schedule.generated_count(), schedule.meshed_count())
        };
        info!(
            "Pipeline finished in {:?}: {} generated, {} meshed",
            start.elapsed(),
            generated,
            meshed
        );
        if generated != self.slots || meshed != self.slots {
            return Err(WorldError::Incomplete {
                generated,
                meshed,
                slots: self.slots,
            });
        }

        let WorldPipeline {
            task_manager,
            world,
            ..
        } = self;
        // Joins the workers and releases the context's handle.
        drop(task_manager);
        Ok(match world.try_into_inner() {
            Ok(world) => world,
            Err(shared) => shared.get().clone(),
        })
    }
}
