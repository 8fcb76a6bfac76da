//! # Task System Core Traits
//!
//! This module defines the building blocks of the task system.
//!
//! ## Core Components
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The outcome of a task, applied on the owning thread
//! - `TaskContext`: The shared state result handlers may touch
//!
//! ## Task Lifecycle
//! 1. A `Task` is published via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the owning thread
//! 5. The result can mutate the world and return follow-up tasks
//!
//! ## Thread Safety
//! - `Task` and `TaskResult` must be `Send` to cross threads
//! - Tasks that need the world hold an `MtResource` and only take read locks
//! - Write locks are only taken in `handle_result()`

use crate::{
    core::MtResource,
    engine_state::{
        meshing::ChunkMesher, pipeline::ChunkSchedule, voxels::terrain::TerrainGenerator,
        voxels::world::WorldGrid,
    },
};

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own everything they need; shared state is reached through
/// `MtResource` handles.
pub trait Task: Send {
    /// Does the work. Runs on a worker thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`.
pub trait TaskResult: Send {
    /// Applies the result on the owning thread.
    ///
    /// # Returns
    /// Follow-up tasks to publish (can be empty).
    fn handle_result(self: Box<Self>, context: &TaskContext) -> Vec<Box<dyn Task + Send>>;
}

/// Shared state handed to every task result.
#[derive(Clone)]
pub struct TaskContext {
    pub world: MtResource<WorldGrid>,
    pub schedule: MtResource<ChunkSchedule>,
    pub generator: TerrainGenerator,
    pub mesher: ChunkMesher,
}
