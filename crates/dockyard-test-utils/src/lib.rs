//! Test utilities for the Dockyard docking engine.
//!
//! This crate provides synthetic geometry and layout fixtures so engine logic
//! can be exercised without a renderer.
//!
//! # Overview
//!
//! The main components are:
//!
//! - [`MockBounds`] - `BoundsProvider` that records every geometry query
//! - [`layout_bounds`] - Derives a plausible rectangle for every element of a layout
//! - [`LayoutBuilder`] and the `fixtures` helpers - Small, readable test layouts
//!
//! # Example
//!
//! ```rust
//! use dockyard::{BoundsProvider, ElementId};
//! use dockyard_core::geometry::Rect;
//! use dockyard_test_utils::{MockBounds, fixtures};
//!
//! let layout = fixtures::ide_layout();
//! let bounds = MockBounds::for_layout(&layout, Rect::new(0.0, 0.0, 1200.0, 800.0));
//!
//! assert!(bounds.rect_of(&ElementId::Root).is_some());
//! assert_eq!(bounds.count_queries(), 1);
//! ```
//!
//! # Design Philosophy
//!
//! ## 1. Geometry Is Data
//!
//! The engine never computes rectangles itself. Tests describe the screen as a
//! map from element to rectangle, exactly as a renderer would report it.
//!
//! ## 2. Interior Mutability
//!
//! `BoundsProvider::rect_of` takes `&self`, so [`MockBounds`] records queries
//! behind a `parking_lot::Mutex`.

pub mod fixtures;
pub mod geometry;
pub mod mock_bounds;

pub use fixtures::LayoutBuilder;
pub use geometry::{TAB_WIDTH, layout_bounds};
pub use mock_bounds::MockBounds;
