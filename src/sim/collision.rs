//! Collision detection between the player circle and falling squares
//!
//! Three stages, cheapest first:
//! 1. Bounding boxes must overlap (no square root)
//! 2. Circle centre inside the rectangle
//! 3. Any rectangle corner within the radius
//!
//! Boundaries are inclusive throughout, so tangent contact at a corner
//! counts as a hit.

use glam::Vec2;

use super::rect::Rect;

/// Bounding box of a circle
#[inline]
fn circle_bounds(center: Vec2, radius: f32) -> Rect {
    Rect::new(
        center.x - radius,
        center.y - radius,
        radius * 2.0,
        radius * 2.0,
    )
}

/// Check whether a circle touches an axis-aligned rectangle
pub fn circle_rect_intersects(rect: &Rect, center: Vec2, radius: f32) -> bool {
    if !rect.overlaps(&circle_bounds(center, radius)) {
        return false;
    }

    if rect.contains(center) {
        return true;
    }

    rect.corners()
        .iter()
        .any(|corner| corner.distance(center) <= radius)
}
