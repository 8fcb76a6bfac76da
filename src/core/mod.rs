//! # Core Module
//!
//! Concurrency primitives shared by the task pipeline.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking

pub mod mt_resource;

pub use mt_resource::MtResource;
