use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneName {
    Top,
    Bottom,
    Left,
    Right,
    LeftHalf,
    RightHalf,
}

impl ZoneName {
    /// Toolbar controls stack vertically only when docked to a side band.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::LeftHalf => "left-half",
            Self::RightHalf => "right-half",
        }
    }
}

/// Where inside a zone the draggable's center settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneAlignment {
    #[default]
    Center,
    /// Flush with the zone's left edge, vertically centered.
    LeadingEdge,
    /// Flush with the zone's right edge, vertically centered.
    TrailingEdge,
    /// Flush with the zone's top edge, horizontally centered.
    TopEdge,
    /// Flush with the zone's bottom edge, horizontally centered.
    BottomEdge,
}

impl ZoneAlignment {
    pub fn target_center(self, zone: &Rect, draggable: Size) -> Point {
        let center = zone.center();
        match self {
            Self::Center => center,
            Self::LeadingEdge => Point::new(zone.left + draggable.width / 2.0, center.y),
            Self::TrailingEdge => Point::new(zone.right() - draggable.width / 2.0, center.y),
            Self::TopEdge => Point::new(center.x, zone.top + draggable.height / 2.0),
            Self::BottomEdge => Point::new(center.x, zone.bottom() - draggable.height / 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockZone {
    pub name: ZoneName,
    pub alignment: ZoneAlignment,
}

impl DockZone {
    pub const fn new(name: ZoneName, alignment: ZoneAlignment) -> Self {
        Self { name, alignment }
    }

    pub const fn centered(name: ZoneName) -> Self {
        Self::new(name, ZoneAlignment::Center)
    }
}
