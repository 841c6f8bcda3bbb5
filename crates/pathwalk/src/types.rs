//! Shared types for the pathwalk arc-length engine.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Magnitude below which a tangent vector is treated as degenerate and
/// returned unnormalized.
pub const TANGENT_EPSILON: f64 = 1e-4;

/// Target spacing (in path units) between the points used to estimate a
/// segment's arc length.
pub const LENGTH_SAMPLE_SPACING: f64 = 2.0;

/// Minimum number of points evaluated when estimating a curved
/// segment's arc length.
pub const MIN_LENGTH_SAMPLES: usize = 10;

/// Upper bound on the points evaluated for one length estimate.
pub const MAX_LENGTH_SAMPLES: usize = 1 << 20;

/// Minimum number of lookup-table intervals generated per segment.
pub const MIN_SEGMENT_SAMPLES: usize = 4;

/// Maximum number of lookup-table intervals generated per segment.
pub const MAX_SEGMENT_SAMPLES: usize = 1 << 20;

/// Two sample distances closer than this are treated as coincident when
/// computing an interpolation factor.
pub const MIX_EPSILON: f64 = 1e-6;

/// A 2D point (or vector) in path coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Magnitude of this point treated as a vector from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Divide by the vector magnitude when it exceeds `floor`.
    ///
    /// Vectors at or below `floor` are returned as-is so that a
    /// near-zero derivative never blows up into a huge or NaN vector.
    #[must_use]
    pub fn normalized_or_self(self, floor: f64) -> Self {
        let len = self.length();
        if len > floor {
            Self::new(self.x / len, self.y / len)
        } else {
            self
        }
    }

    /// Linear interpolation: `mix = 0` yields `self`, `mix = 1` yields `other`.
    #[must_use]
    pub fn lerp(self, other: Self, mix: f64) -> Self {
        Self::new(
            (1.0 - mix).mul_add(self.x, mix * other.x),
            (1.0 - mix).mul_add(self.y, mix * other.y),
        )
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One entry of a path's distance lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Cumulative arc length from the start of the path.
    pub distance: f64,
    /// Position on the path at `distance`.
    pub point: Point,
    /// Unit tangent at `distance` (near-zero where the curve degenerates).
    pub tangent: Point,
    /// Index of the segment this sample was taken from.
    pub segment: usize,
    /// Curve parameter within `segment`, in `[0, 1]`.
    pub t: f64,
}

/// Distance interval covered by one segment of a path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentRange {
    /// Cumulative distance at which the segment starts.
    pub start: f64,
    /// Cumulative distance at which the segment ends.
    pub end: f64,
}

impl SegmentRange {
    /// Length of the interval.
    #[must_use]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns `true` if `distance` lies inside the closed interval.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        (self.start..=self.end).contains(&distance)
    }
}

/// Tuning parameters for building a path's lookup table.
///
/// All parameters have defaults that give roughly one sample every two
/// path units. Use [`SamplerConfig::validate`] (called by
/// [`BezierPath::with_config`](crate::BezierPath::with_config)) to reject
/// values that cannot produce a usable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Target distance between consecutive table samples.
    pub sample_spacing: f64,

    /// Number of relaxation passes used to even out sample spacing.
    /// Zero keeps the samples evenly spaced in curve parameter.
    pub refinement_passes: usize,

    /// Offset on either side of a discontinuity at which the synthetic
    /// boundary samples are placed.
    pub jump_epsilon: f64,
}

impl SamplerConfig {
    /// Default target sample spacing.
    pub const DEFAULT_SAMPLE_SPACING: f64 = 2.0;

    /// Default number of relaxation passes.
    pub const DEFAULT_REFINEMENT_PASSES: usize = 4;

    /// Default offset of the boundary samples around a jump.
    pub const DEFAULT_JUMP_EPSILON: f64 = 1e-8;

    /// Check that the configuration can build a table.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfig`] if `sample_spacing` is not a
    /// positive finite number or `jump_epsilon` is negative or not finite.
    pub fn validate(&self) -> Result<(), PathError> {
        if !self.sample_spacing.is_finite() || self.sample_spacing <= 0.0 {
            return Err(PathError::InvalidConfig(format!(
                "sample_spacing must be positive and finite, got {}",
                self.sample_spacing
            )));
        }
        if !self.jump_epsilon.is_finite() || self.jump_epsilon < 0.0 {
            return Err(PathError::InvalidConfig(format!(
                "jump_epsilon must be non-negative and finite, got {}",
                self.jump_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_spacing: Self::DEFAULT_SAMPLE_SPACING,
            refinement_passes: Self::DEFAULT_REFINEMENT_PASSES,
            jump_epsilon: Self::DEFAULT_JUMP_EPSILON,
        }
    }
}

/// Errors that can occur while building a path.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum PathError {
    /// The segment list was empty.
    #[error("a path needs at least one segment")]
    NoSegments,

    /// A control point of the given segment is NaN or infinite.
    #[error("segment {segment} has a non-finite control point")]
    NonFiniteCoordinate {
        /// Index of the offending segment.
        segment: usize,
    },

    /// Sampler configuration is invalid.
    #[error("invalid sampler configuration: {0}")]
    InvalidConfig(String),
}
