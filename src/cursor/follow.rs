use crate::geometry::{Point, Size};

/// Which side of the pointer the floating badge sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowAlign {
    Center,
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    #[default]
    BottomRight,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowStyle {
    pub align: FollowAlign,
    /// Gap between the pointer and the badge.
    pub side_offset: f64,
    /// Size of the pointer glyph the badge is positioned against.
    pub cursor_size: Size,
}

impl Default for FollowStyle {
    fn default() -> Self {
        Self {
            align: FollowAlign::default(),
            side_offset: 15.0,
            cursor_size: Size::new(20.0, 20.0),
        }
    }
}

impl FollowStyle {
    pub fn with_align(mut self, align: FollowAlign) -> Self {
        self.align = align;
        self
    }

    /// How far the badge's top-left is pulled back from the pointer.
    fn anchor_offset(&self, badge: Size) -> Point {
        let side = self.side_offset;
        let (width, height) = (badge.width, badge.height);
        match self.align {
            FollowAlign::Center => Point::new(width / 3.0, height / 3.0),
            FollowAlign::Top => Point::new(width / 2.0, height + side),
            FollowAlign::TopLeft => Point::new(width + side, height + side),
            FollowAlign::TopRight => Point::new(-side, height + side),
            FollowAlign::Bottom => Point::new(width / 2.0, -side),
            FollowAlign::BottomLeft => Point::new(width + side, -side),
            FollowAlign::BottomRight => Point::new(-side, -side),
            FollowAlign::Left => Point::new(width + side, height / 2.0),
            FollowAlign::Right => Point::new(-side, height / 2.0),
        }
    }
}

/// Top-left of a badge of size `badge` following `pointer`.
pub fn follower_position(pointer: Point, badge: Size, style: FollowStyle) -> Point {
    let offset = style.anchor_offset(badge);
    Point::new(
        pointer.x - offset.x + style.cursor_size.width / 2.0,
        pointer.y - offset.y + style.cursor_size.height / 2.0,
    )
}
