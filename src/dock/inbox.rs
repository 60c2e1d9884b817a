use crate::geometry::{Offset, Rect};
use crate::surface::{ElementId, GeometryProvider};

use super::engine::{DockCommit, DockingConfig, DockingEngine, OriginAnchor};
use super::motion::DockTransition;
use super::zone::{DockZone, ZoneAlignment, ZoneName};

/// Left and right halves of the container's content box, in priority order.
pub fn inbox_zone_rects(container: Rect, padding: f64) -> Vec<(ZoneName, Rect)> {
    let content_width = (container.width - 2.0 * padding).max(0.0);
    let content_height = (container.height - 2.0 * padding).max(0.0);
    let half = content_width / 2.0;
    let left = container.left + padding;
    let top = container.top + padding;
    vec![
        (ZoneName::LeftHalf, Rect::new(left, top, half, content_height)),
        (
            ZoneName::RightHalf,
            Rect::new(left + half, top, half, content_height),
        ),
    ]
}

/// The inbox panel: edge-snaps against whichever half of the screen it is
/// released over.
#[derive(Debug, Clone)]
pub struct InboxDock {
    engine: DockingEngine,
}

impl InboxDock {
    pub fn new() -> Self {
        Self {
            engine: DockingEngine::new(DockingConfig {
                draggable: ElementId::InboxPanel,
                zones: vec![
                    DockZone::new(ZoneName::LeftHalf, ZoneAlignment::LeadingEdge),
                    DockZone::new(ZoneName::RightHalf, ZoneAlignment::TrailingEdge),
                ],
                default_zone: ZoneName::LeftHalf,
                anchor: OriginAnchor::Element(ElementId::InboxContainer),
                transition: DockTransition::tween(),
            }),
        }
    }

    pub fn engine(&self) -> &DockingEngine {
        &self.engine
    }

    pub fn docked_zone(&self) -> Option<ZoneName> {
        self.engine.docked_zone()
    }

    pub fn init(&mut self, geometry: &impl GeometryProvider) -> Option<DockCommit> {
        self.engine.init(geometry)
    }

    pub fn begin_drag(&mut self) {
        self.engine.begin_drag();
    }

    pub fn drag_move(&mut self, visual_offset: Offset) {
        self.engine.drag_move(visual_offset);
    }

    pub fn end_drag(&mut self, geometry: &impl GeometryProvider) -> DockCommit {
        self.engine.end_drag(geometry)
    }
}

impl Default for InboxDock {
    fn default() -> Self {
        Self::new()
    }
}
