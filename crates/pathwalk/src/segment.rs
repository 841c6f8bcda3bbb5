//! Cubic Bezier segment evaluation: position, tangent, and arc length.
//!
//! A [`Segment`] is four control points `A, B, C, D`. Straight lines are
//! encoded as *degenerate-linear* cubics with `A == B` and `C == D`; their
//! length is exact, while curved segments get a polyline estimate that
//! slightly underestimates the true arc length.
//!
//! The length is computed once in [`Segment::new`] and stored, so a
//! segment is plain immutable data that can be shared across threads.

use serde::{Deserialize, Serialize};

use crate::types::{
    LENGTH_SAMPLE_SPACING, MAX_LENGTH_SAMPLES, MIN_LENGTH_SAMPLES, Point, TANGENT_EPSILON,
};

/// One cubic Bezier curve.
///
/// Serializes as its four control points; the length is recomputed on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point; 4]", into = "[Point; 4]")]
pub struct Segment {
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    length: f64,
}

impl Segment {
    /// Create a segment from its start point, two control points, and end point.
    #[must_use]
    pub fn new(a: Point, b: Point, c: Point, d: Point) -> Self {
        let mut segment = Self {
            a,
            b,
            c,
            d,
            length: 0.0,
        };
        segment.length = segment.estimate_length();
        segment
    }

    /// A straight segment from `from` to `to`, encoded as a degenerate cubic.
    #[must_use]
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(from, from, to, to)
    }

    /// Degree-elevate a quadratic Bezier into an equivalent cubic.
    #[must_use]
    pub fn quadratic(from: Point, control: Point, to: Point) -> Self {
        const TWO_THIRDS: f64 = 2.0 / 3.0;
        Self::new(
            from,
            from + (control - from) * TWO_THIRDS,
            to + (control - to) * TWO_THIRDS,
            to,
        )
    }

    /// Start point (`A`).
    #[must_use]
    pub const fn start(&self) -> Point {
        self.a
    }

    /// End point (`D`).
    #[must_use]
    pub const fn end(&self) -> Point {
        self.d
    }

    /// All four control points in order `[A, B, C, D]`.
    #[must_use]
    pub const fn control_points(&self) -> [Point; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns `true` if every control point is finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }

    /// Returns `true` when `A == B` and `C == D`, i.e. the segment is a
    /// straight line from `A` to `D`.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.a == self.b && self.c == self.d
    }

    /// Total length of the control polygon `A-B-C-D`.
    ///
    /// Always an upper bound on the arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        self.a.distance(self.b) + self.b.distance(self.c) + self.c.distance(self.d)
    }

    /// Arc length of the segment.
    ///
    /// Exact for linear segments; a polyline estimate otherwise.
    #[must_use]
    pub const fn total_length(&self) -> f64 {
        self.length
    }

    /// Position at curve parameter `t`, clamped to `[0, 1]`.
    ///
    /// Returns `A` exactly at `t = 0` and `D` exactly at `t = 1`.
    #[must_use]
    pub fn point_at_parameter(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;
        Point::new(
            w0.mul_add(self.a.x, w1.mul_add(self.b.x, w2.mul_add(self.c.x, w3 * self.d.x))),
            w0.mul_add(self.a.y, w1.mul_add(self.b.y, w2.mul_add(self.c.y, w3 * self.d.y))),
        )
    }

    /// Unit tangent at curve parameter `t`, clamped to `[0, 1]`.
    ///
    /// At the endpoints the direction toward the first distinct control
    /// point is used, since the derivative vanishes there whenever the
    /// adjacent control point coincides with the endpoint. Anywhere the
    /// direction vector has magnitude at or below [`TANGENT_EPSILON`] it
    /// is returned unnormalized.
    #[must_use]
    pub fn tangent_at_parameter(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);

        #[allow(clippy::float_cmp)]
        let direction = if t == 0.0 {
            if self.a == self.b {
                self.c - self.a
            } else {
                self.b - self.a
            }
        } else if t == 1.0 {
            if self.d == self.c {
                self.d - self.b
            } else {
                self.d - self.c
            }
        } else {
            self.derivative(t)
        };

        direction.normalized_or_self(TANGENT_EPSILON)
    }

    /// Raw first derivative of the curve at `t`.
    fn derivative(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let w0 = 3.0 * u * u;
        let w1 = 6.0 * u * t;
        let w2 = 3.0 * t * t;
        let ab = self.b - self.a;
        let bc = self.c - self.b;
        let cd = self.d - self.c;
        Point::new(
            w0.mul_add(ab.x, w1.mul_add(bc.x, w2 * cd.x)),
            w0.mul_add(ab.y, w1.mul_add(bc.y, w2 * cd.y)),
        )
    }

    /// Compute the arc length: exact for linear segments, otherwise the
    /// length of a polyline through evenly spaced parameter values.
    ///
    /// The point count scales with the control polygon length so that
    /// consecutive points are roughly [`LENGTH_SAMPLE_SPACING`] apart.
    fn estimate_length(&self) -> f64 {
        if !self.is_finite() {
            return f64::NAN;
        }
        if self.is_linear() {
            return self.a.distance(self.d);
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let count = ((self.control_polygon_length() / LENGTH_SAMPLE_SPACING).ceil() as usize)
            .clamp(MIN_LENGTH_SAMPLES, MAX_LENGTH_SAMPLES);

        #[allow(clippy::cast_precision_loss)]
        let last = (count - 1) as f64;

        let mut total = 0.0;
        let mut prev = self.a;
        for i in 1..count {
            #[allow(clippy::cast_precision_loss)]
            let p = self.point_at_parameter(i as f64 / last);
            total += prev.distance(p);
            prev = p;
        }
        total
    }
}

impl From<[Point; 4]> for Segment {
    fn from([a, b, c, d]: [Point; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<Segment> for [Point; 4] {
    fn from(segment: Segment) -> Self {
        segment.control_points()
    }
}
