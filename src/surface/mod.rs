//! Measurement boundary between the core and whatever renders it.

use std::collections::HashMap;

use crate::dock::ZoneName;
use crate::geometry::{Rect, Size};

/// Visual elements the core needs to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// The annotated surface the cursor moves over.
    Surface,
    Toolbar,
    InboxPanel,
    /// Positioned parent of the inbox panel; its top-left is the panel's
    /// untranslated origin.
    InboxContainer,
    Zone(ZoneName),
}

/// Answers "where is element X right now" on demand.
///
/// `None` means the element is not laid out yet. Zero-sized rectangles are
/// treated the same way by callers.
pub trait GeometryProvider {
    fn element_rect(&self, element: ElementId) -> Option<Rect>;
    fn viewport(&self) -> Size;

    fn measurable_rect(&self, element: ElementId) -> Option<Rect> {
        self.element_rect(element).filter(Rect::is_measurable)
    }
}

/// In-memory provider whose rectangles are set by the caller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGeometry {
    viewport: Size,
    rects: HashMap<ElementId, Rect>,
}

impl ScriptedGeometry {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            rects: HashMap::new(),
        }
    }

    pub fn with_rect(mut self, element: ElementId, rect: Rect) -> Self {
        self.set_rect(element, rect);
        self
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    pub fn remove_rect(&mut self, element: ElementId) {
        self.rects.remove(&element);
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }
}

impl GeometryProvider for ScriptedGeometry {
    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
