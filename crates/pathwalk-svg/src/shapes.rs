//! Paths for simple shapes.

use pathwalk::{BezierPath, PathError, Point, Segment};

/// Handle length of the circle's half-arcs, as a multiple of the radius.
///
/// A single cubic through the three points of a half circle would use
/// 4/3. The slightly shorter handle pulls the arc a little inside the true
/// circle.
pub const CIRCLE_HANDLE_FACTOR: f64 = 1.3;

/// Segments of a circle: two half-arcs starting at the leftmost point and
/// running through the top (smaller y) first.
#[must_use]
pub fn circle_segments(center: Point, radius: f64) -> [Segment; 2] {
    let handle = CIRCLE_HANDLE_FACTOR * radius;
    let left = Point::new(center.x - radius, center.y);
    let right = Point::new(center.x + radius, center.y);
    [
        Segment::new(
            left,
            Point::new(left.x, center.y - handle),
            Point::new(right.x, center.y - handle),
            right,
        ),
        Segment::new(
            right,
            Point::new(right.x, center.y + handle),
            Point::new(left.x, center.y + handle),
            left,
        ),
    ]
}

/// A path along a single straight line.
///
/// # Errors
///
/// Returns [`PathError::NonFiniteCoordinate`] for NaN or infinite input.
pub fn line(from: Point, to: Point) -> Result<BezierPath, PathError> {
    BezierPath::new(vec![Segment::line(from, to)])
}

/// A closed path approximating a circle.
///
/// # Errors
///
/// Returns [`PathError::NonFiniteCoordinate`] for NaN or infinite input.
pub fn circle(center: Point, radius: f64) -> Result<BezierPath, PathError> {
    BezierPath::new(circle_segments(center, radius).to_vec())
}
