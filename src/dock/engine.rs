use crate::geometry::{center_offset, rects_overlap, Offset, Point, Rect};
use crate::surface::{ElementId, GeometryProvider};

use super::motion::DockTransition;
use super::zone::{DockZone, ZoneName};

/// What the draggable's translation is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginAnchor {
    /// The draggable's own top-left, captured once at mount before any
    /// translation is applied.
    Draggable,
    /// The top-left of another element (the draggable's positioned parent),
    /// measured again on every evaluation.
    Element(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockingConfig {
    pub draggable: ElementId,
    /// Zones in priority order; the first overlapping one wins.
    pub zones: Vec<DockZone>,
    pub default_zone: ZoneName,
    pub anchor: OriginAnchor,
    pub transition: DockTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    /// Initial placement over the default zone.
    Mounted(ZoneName),
    Snapped(ZoneName),
    /// Released outside every zone; back to the last docked position.
    Reverted,
}

/// Destination the host animates the draggable to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockCommit {
    pub offset: Offset,
    pub outcome: DockOutcome,
    pub transition: DockTransition,
}

impl DockCommit {
    pub fn zone(&self) -> Option<ZoneName> {
        match self.outcome {
            DockOutcome::Mounted(zone) | DockOutcome::Snapped(zone) => Some(zone),
            DockOutcome::Reverted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    visual_offset: Offset,
}

#[derive(Debug, Clone)]
pub struct DockingEngine {
    config: DockingConfig,
    mount_origin: Option<Point>,
    last_known_position: Offset,
    docked_zone: Option<ZoneName>,
    drag: Option<DragSession>,
}

impl DockingEngine {
    pub fn new(config: DockingConfig) -> Self {
        Self {
            config,
            mount_origin: None,
            last_known_position: Offset::zero(),
            docked_zone: None,
            drag: None,
        }
    }

    pub fn config(&self) -> &DockingConfig {
        &self.config
    }

    pub fn last_known_position(&self) -> Offset {
        self.last_known_position
    }

    pub fn docked_zone(&self) -> Option<ZoneName> {
        self.docked_zone
    }

    pub fn is_initialized(&self) -> bool {
        self.docked_zone.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the host last reported the draggable during the current drag.
    pub fn visual_offset(&self) -> Offset {
        self.drag
            .map(|session| session.visual_offset)
            .unwrap_or(self.last_known_position)
    }

    /// Places the draggable over the default zone. Runs once; returns `None`
    /// when already placed or when the draggable, its anchor or the default
    /// zone cannot be measured yet, in which case the host may call again
    /// after the next layout pass.
    pub fn init(&mut self, geometry: &impl GeometryProvider) -> Option<DockCommit> {
        if self.is_initialized() {
            return None;
        }
        let draggable = geometry.measurable_rect(self.config.draggable)?;
        if self.config.anchor == OriginAnchor::Draggable {
            self.mount_origin = Some(draggable.top_left());
        }
        let origin = self.origin(geometry)?;
        let default_zone = self.config.default_zone;
        let zone = self
            .config
            .zones
            .iter()
            .copied()
            .find(|zone| zone.name == default_zone)?;
        let zone_rect = geometry.measurable_rect(ElementId::Zone(zone.name))?;

        let offset = snap_offset(zone, &zone_rect, origin, &draggable);
        self.last_known_position = offset;
        self.docked_zone = Some(zone.name);
        tracing::debug!(zone = zone.name.label(), ?offset, "dock mounted");

        Some(DockCommit {
            offset,
            outcome: DockOutcome::Mounted(zone.name),
            transition: DockTransition::Immediate,
        })
    }

    pub fn begin_drag(&mut self) {
        self.drag = Some(DragSession {
            visual_offset: self.last_known_position,
        });
    }

    /// Records where the host is drawing the draggable. Nothing is committed
    /// and no zone is evaluated until the drag ends.
    pub fn drag_move(&mut self, visual_offset: Offset) {
        let session = self.drag.get_or_insert(DragSession { visual_offset });
        session.visual_offset = visual_offset;
    }

    /// Resolves the release: the first overlapping zone in priority order, or
    /// the last known position when nothing matches.
    pub fn end_drag(&mut self, geometry: &impl GeometryProvider) -> DockCommit {
        self.drag = None;

        let Some(draggable) = geometry.measurable_rect(self.config.draggable) else {
            tracing::debug!("draggable not measurable; reverting");
            return self.revert();
        };
        let Some(origin) = self.origin(geometry) else {
            tracing::debug!("dock origin not measurable; reverting");
            return self.revert();
        };

        let Some((zone, zone_rect)) = self.first_overlapping_zone(geometry, &draggable) else {
            return self.revert();
        };

        let offset = snap_offset(zone, &zone_rect, origin, &draggable);
        self.last_known_position = offset;
        self.docked_zone = Some(zone.name);
        tracing::info!(zone = zone.name.label(), ?offset, "panel docked");

        DockCommit {
            offset,
            outcome: DockOutcome::Snapped(zone.name),
            transition: self.config.transition,
        }
    }

    fn first_overlapping_zone(
        &self,
        geometry: &impl GeometryProvider,
        draggable: &Rect,
    ) -> Option<(DockZone, Rect)> {
        self.config.zones.iter().copied().find_map(|zone| {
            geometry
                .measurable_rect(ElementId::Zone(zone.name))
                .filter(|rect| rects_overlap(draggable, rect))
                .map(|rect| (zone, rect))
        })
    }

    fn origin(&self, geometry: &impl GeometryProvider) -> Option<Point> {
        match self.config.anchor {
            OriginAnchor::Draggable => self.mount_origin,
            OriginAnchor::Element(element) => geometry
                .measurable_rect(element)
                .map(|rect| rect.top_left()),
        }
    }

    fn revert(&self) -> DockCommit {
        tracing::debug!(offset = ?self.last_known_position, "released outside dock zones");
        DockCommit {
            offset: self.last_known_position,
            outcome: DockOutcome::Reverted,
            transition: self.config.transition,
        }
    }
}

fn snap_offset(zone: DockZone, zone_rect: &Rect, origin: Point, draggable: &Rect) -> Offset {
    let size = draggable.size();
    let origin_center = Point::new(origin.x + size.width / 2.0, origin.y + size.height / 2.0);
    center_offset(origin_center, zone.alignment.target_center(zone_rect, size))
}
