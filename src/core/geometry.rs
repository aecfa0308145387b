//! Pixel-space geometry used by hit-testing and renderers.

use crate::core::PixelPoint;

/// Euclidean distance between two pixel points.
#[must_use]
pub fn distance(a: PixelPoint, b: PixelPoint) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Distance from `point` to the closed segment `start..end`.
///
/// The point is projected onto the segment and the projection parameter is
/// clamped to `[0, 1]`, so points beyond either end measure to that endpoint
/// instead of to the infinite line. A zero-length segment degrades to the
/// distance to `start`.
#[must_use]
pub fn point_to_segment_distance(point: PixelPoint, start: PixelPoint, end: PixelPoint) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return distance(point, start);
    }

    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    distance(point, PixelPoint::new(start.x + t * dx, start.y + t * dy))
}

/// Converts a media-space length or coordinate to bitmap space.
#[must_use]
pub fn to_bitmap(value: f64, pixel_ratio: f64) -> f64 {
    value * pixel_ratio
}
