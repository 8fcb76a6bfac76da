//! # Voxel Task System
//!
//! Tasks related to world generation, run through the task manager.

pub mod chunk_generation_task;
