//! Geometry primitives and the read-only probe the engine queries.
//!
//! All coordinates are in layout units with the origin at the top-left of the
//! viewport; `y` grows downwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Overlap of two rectangles. Edge-adjacent rectangles intersect with a
    /// zero-area result; disjoint ones return `None`.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Size of the visible window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Read-only access to element boxes and the scroll position
///
/// Reads may be expensive on a real host, so callers confine them to
/// one-shot operations and the per-frame observer pass.
pub trait GeometryProbe {
    /// Bounding box of an element relative to the viewport, `None` if absent
    fn bounding_rect(&self, id: &str) -> Option<Rect>;

    /// Current vertical scroll offset
    fn scroll_y(&self) -> f64;

    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(i.area(), 1000.0);
    }

    #[test]
    fn test_intersect_edge_adjacent_and_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let touching = Rect::new(0.0, 100.0, 100.0, 50.0);
        assert_eq!(a.intersect(&touching).map(|r| r.area()), Some(0.0));

        let far = Rect::new(0.0, 200.0, 100.0, 50.0);
        assert!(a.intersect(&far).is_none());
    }

    #[test]
    fn test_viewport_center() {
        let viewport = Viewport::new(1280.0, 720.0);
        assert_eq!(viewport.center(), Point::new(640.0, 360.0));
    }
}
