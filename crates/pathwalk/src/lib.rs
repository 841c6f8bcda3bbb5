//! pathwalk: Arc-length queries over chains of cubic Bezier segments (sans-IO).
//!
//! A [`BezierPath`] resamples its segments into a lookup table whose
//! samples are close to evenly spaced in distance, then answers
//! "where am I, and which way am I heading, after travelling `L` units"
//! in logarithmic time:
//!
//! segments -> length estimation -> per-segment resampling ->
//! parameter relaxation -> jump splicing -> distance queries.
//!
//! Paths may contain discontinuities (a segment that does not start where
//! the previous one ended). Queries near such a *jump* snap to one side of
//! it and never report a point in the gap.
//!
//! This crate has **no I/O dependencies**. Converting SVG path data,
//! drawing commands and shapes into segments lives in `pathwalk-svg`.
//!
//! ```
//! use pathwalk::{BezierPath, Point, Segment};
//!
//! let arch = Segment::new(
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 100.0),
//!     Point::new(100.0, 100.0),
//!     Point::new(100.0, 0.0),
//! );
//! let path = BezierPath::new(vec![arch]).unwrap();
//!
//! let half = path.total_length() / 2.0;
//! let top = path.point_at_length(half, false);
//! assert!((top.x - 50.0).abs() < 1e-3 && (top.y - 75.0).abs() < 1e-3);
//! assert!(path.angle_at_length(half, false).abs() < 1e-3);
//! ```

pub mod diagnostics;
pub mod path;
pub mod segment;
pub mod types;

pub use diagnostics::{PathDiagnostics, SpacingStats, build_with_diagnostics};
pub use path::BezierPath;
pub use segment::Segment;
pub use types::{PathError, Point, Sample, SamplerConfig, SegmentRange};
