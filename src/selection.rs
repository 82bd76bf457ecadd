use crate::geometry::Point;
use crate::viewport::ViewportState;

/// Inset between the display surface edge and the valid rectangle bounds.
pub const MARGIN: i32 = 5;
/// Smallest width the resize handles will shrink the selection to.
pub const MIN_WIDTH: i32 = 50;
/// Smallest height the resize handles will shrink the selection to.
pub const MIN_HEIGHT: i32 = 50;

/// Selection rectangle in display coordinates.
///
/// Mutated only through [`crate::drag::DragController`], which keeps it
/// within the margins and above the minimum size at every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl SelectionRect {
    /// Default inset geometry for a freshly loaded image: a tenth of the
    /// display size on each side.
    pub fn initial(viewport: &ViewportState) -> Self {
        let w = viewport.display_width;
        let h = viewport.display_height;
        Self {
            left: round_div(w, 10.0),
            top: round_div(h, 10.0),
            width: w - round_div(w, 5.0),
            height: h - round_div(h, 5.0),
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Horizontal midpoint used by the top and bottom mid-edge handles.
    pub fn mid_x(&self) -> i32 {
        self.left + round_div(self.width, 2.0)
    }

    /// Vertical midpoint used by the left and right mid-edge handles.
    pub fn mid_y(&self) -> i32 {
        self.top + round_div(self.height, 2.0)
    }

    /// The eight handle anchors, corners first, then mid-edges.
    pub fn handle_anchors(&self) -> [Point; 8] {
        [
            Point::new(self.left, self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.mid_y()),
            Point::new(self.right(), self.mid_y()),
            Point::new(self.mid_x(), self.top),
            Point::new(self.mid_x(), self.bottom()),
        ]
    }

    /// True when all margin and minimum-size bounds hold.
    pub fn in_bounds(&self, viewport: &ViewportState) -> bool {
        self.width >= MIN_WIDTH
            && self.height >= MIN_HEIGHT
            && self.left >= MARGIN
            && self.top >= MARGIN
            && self.right() <= viewport.display_width - MARGIN
            && self.bottom() <= viewport.display_height - MARGIN
    }
}

fn round_div(value: i32, divisor: f32) -> i32 {
    (value as f32 / divisor).round() as i32
}
