use crate::geometry::{Offset, Rect, Size};
use crate::surface::{ElementId, GeometryProvider};

use super::engine::{DockCommit, DockOutcome, DockingConfig, DockingEngine, OriginAnchor};
use super::motion::DockTransition;
use super::zone::{DockZone, ZoneName};

/// Thickness of the edge bands the toolbar docks into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarBands {
    /// Height of the top and bottom bands.
    pub edge: f64,
    /// Width of the left and right bands, which span between the top and
    /// bottom bands.
    pub side: f64,
}

impl Default for ToolbarBands {
    fn default() -> Self {
        Self {
            edge: 112.0,
            side: 160.0,
        }
    }
}

/// Band rectangles for a full-viewport overlay, in priority order.
pub fn toolbar_zone_rects(viewport: Size, bands: ToolbarBands) -> Vec<(ZoneName, Rect)> {
    let middle_height = (viewport.height - 2.0 * bands.edge).max(0.0);
    vec![
        (ZoneName::Top, Rect::new(0.0, 0.0, viewport.width, bands.edge)),
        (
            ZoneName::Bottom,
            Rect::new(0.0, viewport.height - bands.edge, viewport.width, bands.edge),
        ),
        (
            ZoneName::Left,
            Rect::new(0.0, bands.edge, bands.side, middle_height),
        ),
        (
            ZoneName::Right,
            Rect::new(
                viewport.width - bands.side,
                bands.edge,
                bands.side,
                middle_height,
            ),
        ),
    ]
}

/// The floating toolbar: center-snaps into the four edge bands and stacks
/// its controls vertically while docked to a side band.
#[derive(Debug, Clone)]
pub struct ToolbarDock {
    engine: DockingEngine,
    vertical: bool,
}

impl ToolbarDock {
    pub fn new() -> Self {
        Self {
            engine: DockingEngine::new(DockingConfig {
                draggable: ElementId::Toolbar,
                zones: vec![
                    DockZone::centered(ZoneName::Top),
                    DockZone::centered(ZoneName::Bottom),
                    DockZone::centered(ZoneName::Left),
                    DockZone::centered(ZoneName::Right),
                ],
                default_zone: ZoneName::Bottom,
                anchor: OriginAnchor::Draggable,
                transition: DockTransition::toolbar_spring(),
            }),
            vertical: false,
        }
    }

    pub fn engine(&self) -> &DockingEngine {
        &self.engine
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn init(&mut self, geometry: &impl GeometryProvider) -> Option<DockCommit> {
        let commit = self.engine.init(geometry)?;
        self.apply_orientation(commit);
        Some(commit)
    }

    pub fn begin_drag(&mut self) {
        self.engine.begin_drag();
    }

    pub fn drag_move(&mut self, visual_offset: Offset) {
        self.engine.drag_move(visual_offset);
    }

    pub fn end_drag(&mut self, geometry: &impl GeometryProvider) -> DockCommit {
        let commit = self.engine.end_drag(geometry);
        self.apply_orientation(commit);
        commit
    }

    fn apply_orientation(&mut self, commit: DockCommit) {
        if let DockOutcome::Mounted(zone) | DockOutcome::Snapped(zone) = commit.outcome {
            self.vertical = zone.is_vertical();
        }
    }
}

impl Default for ToolbarDock {
    fn default() -> Self {
        Self::new()
    }
}
