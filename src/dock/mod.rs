//! Drag-and-snap docking for floating panels.

mod engine;
mod inbox;
mod motion;
mod toolbar;
mod zone;

pub use engine::{DockCommit, DockOutcome, DockingConfig, DockingEngine, OriginAnchor};
pub use inbox::{inbox_zone_rects, InboxDock};
pub use motion::{DockTransition, MotionTrack};
pub use toolbar::{toolbar_zone_rects, ToolbarBands, ToolbarDock};
pub use zone::{DockZone, ZoneAlignment, ZoneName};
