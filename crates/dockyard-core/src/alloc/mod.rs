//! Hash collections used across Dockyard.
//!
//! Geometry caches and id sets are keyed by short strings and are rebuilt
//! often, so AHash replaces SipHash throughout.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
