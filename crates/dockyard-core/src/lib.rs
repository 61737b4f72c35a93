//! Dockyard Core
//!
//! Shared utilities for the Dockyard docking layout engine: geometry, math
//! re-exports, hash collections, logging and frame profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
