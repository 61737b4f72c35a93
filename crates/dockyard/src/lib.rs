//! Docking layout engine for IDE-style panel layouts.
//!
//! This crate provides the model and interaction logic behind dockable panels:
//! - **Layout model**: four edge containers holding groups of tabbed panels,
//!   plus z-ordered floating windows
//! - **Mutation engine**: move, merge, split, float and resize operations that
//!   never leave the tree half-changed
//! - **Hot zones**: classify the pointer into a tab bar, container edge or
//!   docked element edge while dragging
//! - **Drag state machine**: threshold-gated drags that lift their payload into
//!   a floating window and commit on release
//! - **Resize controller** and **snap calculator** for handles and alignment
//!
//! Rendering is left to the host, which passes element rectangles in through
//! [`BoundsProvider`].
//!
//! # Quick Start
//!
//! ```
//! use dockyard::{BoundsMap, DockConfig, DockEngine, DragPayload, ElementId, Layout, PanelId};
//! use dockyard::model::{Direction, Edge, Panel, PanelGroup, Tab};
//! use dockyard_core::geometry::Rect;
//! use dockyard_core::math::Vec2;
//!
//! let mut layout = Layout::new();
//! layout.container_mut(Edge::Left).groups.push(
//!     PanelGroup::new("left", Direction::Row)
//!         .panel(Panel::new("files", "Files").tab(Tab::new("files-tab", "Files"))),
//! );
//! let mut engine = DockEngine::new(layout, DockConfig::default()).unwrap();
//! let bounds = BoundsMap::new().with(ElementId::Root, Rect::new(0.0, 0.0, 1200.0, 800.0));
//!
//! // Drag the panel out into empty space.
//! let payload = DragPayload::Panel(PanelId::new("files"));
//! engine.pointer_down(payload, Vec2::new(20.0, 10.0), Rect::new(0.0, 0.0, 200.0, 150.0)).unwrap();
//! engine.pointer_move(&bounds, Vec2::new(500.0, 300.0), false).unwrap();
//! engine.pointer_up(&bounds, Vec2::new(500.0, 300.0)).unwrap();
//!
//! assert_eq!(engine.layout().floating.len(), 1);
//! assert!(engine.layout().container(Edge::Left).groups.is_empty());
//! ```

pub mod bounds;
pub mod config;
pub mod context;
pub mod drag;
pub mod engine;
pub mod error;
pub mod event;
pub mod hot_zone;
pub mod id;
pub mod locate;
pub mod model;
pub mod operations;
pub mod resize;
pub mod snap;

pub use bounds::{BoundsMap, BoundsProvider, ElementId};
pub use config::DockConfig;
pub use context::DockingContext;
pub use drag::{DragManager, DragPayload, DragPhase, DragSnapshot, DropOutcome};
pub use engine::DockEngine;
pub use error::{DockError, DockResult};
pub use event::{DockEvent, ObserverId};
pub use hot_zone::{HotZone, HotZoneResolver};
pub use id::{FloatId, GroupId, PanelId, TabId};
pub use locate::{GroupLocation, PanelLocation, TabLocation};
pub use model::Layout;
pub use operations::DockOperation;
pub use resize::{ResizeController, ResizeHandle, ResizeHandles, ResizeTarget};
pub use snap::{SnapCalculator, SnapGuide, SnapResult};
