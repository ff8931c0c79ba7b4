//! Axis-aligned rectangles in page point-space.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in page coordinates (points, y increases downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle width in points.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Rectangle height in points.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Check if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Union of two rectangles: componentwise min/min/max/max.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of a non-empty sequence of rectangles.
    ///
    /// Returns `None` for an empty iterator.
    pub fn union_all<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        rects.into_iter().reduce(|a, b| a.union(&b))
    }

    /// Check if this rectangle overlaps another (shared area, edges count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 > other.x0 && self.x0 < other.x1 && self.y1 > other.y0 && self.y0 < other.y1
    }

    /// Check if `other` lies entirely within this rectangle, allowing the
    /// given tolerance in points on every edge.
    pub fn contains_with_tolerance(&self, other: &Rect, tolerance: f32) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.y0 >= self.y0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y1 <= self.y1 + tolerance
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Uniform margins on all four sides.
    pub fn uniform(pts: f32) -> Self {
        Self {
            top: pts,
            right: pts,
            bottom: pts,
            left: pts,
        }
    }

    /// Content width left inside a page of the given width.
    pub fn content_width(&self, page_width: f32) -> f32 {
        page_width - self.left - self.right
    }

    /// Content height left inside a page of the given height.
    pub fn content_height(&self, page_height: f32) -> f32 {
        page_height - self.top - self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(36.0)
    }
}
