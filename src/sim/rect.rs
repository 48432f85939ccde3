//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows right, y grows down, so `top <= bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `size` centred on `center` the way integer pixel rects
    /// centre: the half size rounds down, so an odd square sits a half pixel
    /// right of and below the exact centre
    pub fn centered_square(center: Vec2, size: f32) -> Self {
        let half = (size / 2.0).floor();
        Self::new(center.x - half, center.y - half, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Closed containment: points on the edge are inside
    pub fn contains(&self, p: Vec2) -> bool {
        self.left <= p.x && p.x <= self.right() && self.top <= p.y && p.y <= self.bottom()
    }

    /// Closed overlap test between two rectangles (touching edges overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.left
            || self.left > other.right()
            || self.bottom() < other.top
            || self.top > other.bottom())
    }

    /// The four corners: top-left, bottom-left, top-right, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.left, self.bottom()),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.right(), self.bottom()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents() {
        let r = Rect::new(10.0, 20.0, 15.0, 5.0);
        assert_eq!(r.right(), 25.0);
        assert_eq!(r.bottom(), 25.0);
        assert_eq!(r.corners()[3], Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_contains_is_closed() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_overlaps_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_centered_square() {
        let r = Rect::centered_square(Vec2::new(100.0, 0.0), 15.0);
        assert_eq!(r.left, 93.0);
        assert_eq!(r.top, -7.0);
        assert_eq!(r.width, 15.0);

        let even = Rect::centered_square(Vec2::new(100.0, 0.0), 16.0);
        assert_eq!(even.top_left(), Vec2::new(92.0, -8.0));
    }
}
