//! Arc-length lookup table and distance-based queries over a chain of
//! cubic segments.
//!
//! Construction builds a table of [`Sample`]s that is close to uniform in
//! distance:
//!
//! 1. Each segment gets `max(4, ceil(length / spacing))` intervals.
//! 2. Interval boundaries start evenly spaced in curve parameter and are
//!    then nudged by a fixed number of relaxation passes: every interior
//!    parameter moves back by `step * (accumulated spacing error)`, where
//!    the error is measured against the ideal path-wide spacing.
//! 3. Samples are emitted with cumulative distances taken from the
//!    refined chord lengths, scaled so each segment ends exactly at its
//!    cumulative offset plus its length.
//! 4. Wherever a segment does not start exactly where the previous one
//!    ended, two synthetic samples holding the two endpoints are spliced
//!    in just either side of the midpoint distance and the midpoint is
//!    recorded as a *jump*.
//!
//! Queries binary-search the table and then either blend two samples
//! linearly (fast) or re-evaluate the owning segment at an interpolated
//! curve parameter (accurate).

use log::{debug, trace};
use serde::Serialize;

use crate::segment::Segment;
use crate::types::{
    MAX_SEGMENT_SAMPLES, MIN_SEGMENT_SAMPLES, MIX_EPSILON, PathError, Point, Sample,
    SamplerConfig, SegmentRange, TANGENT_EPSILON,
};

/// An ordered chain of cubic segments with a distance lookup table.
///
/// Immutable once built. All queries take `&self` and never allocate
/// (apart from [`jumps`](Self::jumps) and
/// [`sample_evenly`](Self::sample_evenly)), so a path can be shared
/// freely between threads.
///
/// # Examples
///
/// ```
/// use pathwalk::{BezierPath, Point, Segment};
///
/// let path = BezierPath::new(vec![
///     Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
///     Segment::line(Point::new(10.0, 0.0), Point::new(10.0, 10.0)),
/// ])
/// .unwrap();
///
/// assert!((path.total_length() - 20.0).abs() < 1e-12);
/// let p = path.point_at_length(15.0, false);
/// assert!((p.x - 10.0).abs() < 1e-6 && (p.y - 5.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct BezierPath {
    segments: Vec<Segment>,
    total_length: f64,
    samples: Vec<Sample>,
    ranges: Vec<SegmentRange>,
    jumps: Vec<f64>,
}

/// Where the answer to a length query comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolution {
    /// A table sample, used as-is.
    Sample(usize),
    /// Linear blend of two table samples.
    Blend { from: usize, to: usize, mix: f64 },
    /// A segment evaluated at a curve parameter.
    Curve { segment: usize, t: f64 },
}

impl BezierPath {
    /// Build a path with the default [`SamplerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoSegments`] if `segments` is empty and
    /// [`PathError::NonFiniteCoordinate`] if any control point is NaN or
    /// infinite.
    pub fn new(segments: Vec<Segment>) -> Result<Self, PathError> {
        Self::with_config(segments, &SamplerConfig::default())
    }

    /// Build a path with a custom [`SamplerConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), plus [`PathError::InvalidConfig`] when
    /// `config` fails [`SamplerConfig::validate`].
    pub fn with_config(segments: Vec<Segment>, config: &SamplerConfig) -> Result<Self, PathError> {
        config.validate()?;
        if segments.is_empty() {
            return Err(PathError::NoSegments);
        }
        if let Some(segment) = segments.iter().position(|s| !s.is_finite()) {
            return Err(PathError::NonFiniteCoordinate { segment });
        }

        let (offsets, total_length) = segment_offsets(&segments);
        let table = resample(&segments, &offsets, total_length, config);
        let (samples, jumps) = splice_jumps(&segments, &table, config.jump_epsilon);
        let ranges = segments
            .iter()
            .zip(&offsets)
            .map(|(segment, &start)| SegmentRange {
                start,
                end: start + segment.total_length(),
            })
            .collect();

        debug!(
            "built lookup table: {} segments, {} samples, {} jumps, length {total_length:.3}",
            segments.len(),
            samples.len(),
            jumps.len(),
        );

        Ok(Self {
            segments,
            total_length,
            samples,
            ranges,
            jumps,
        })
    }

    /// Sum of all segment lengths.
    #[must_use]
    pub const fn total_length(&self) -> f64 {
        self.total_length
    }

    /// The segments, in path order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The lookup table, sorted by non-decreasing distance.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Distance range covered by each segment, in path order.
    #[must_use]
    pub fn segment_ranges(&self) -> &[SegmentRange] {
        &self.ranges
    }

    /// Distances at which the path jumps between disconnected segments.
    #[must_use]
    pub fn jumps(&self) -> Vec<f64> {
        self.jumps.clone()
    }

    /// Returns `true` if every segment starts exactly where the previous
    /// one ended.
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        self.jumps.is_empty()
    }

    /// First point of the path.
    #[must_use]
    pub fn start(&self) -> Point {
        self.samples[0].point
    }

    /// Last point of the path.
    #[must_use]
    pub fn end(&self) -> Point {
        self.samples[self.samples.len() - 1].point
    }

    /// Index of the segment covering `length`.
    ///
    /// A distance exactly on a boundary belongs to the earlier segment.
    /// Out-of-range input clamps to the first or last segment.
    #[must_use]
    pub fn segment_at_length(&self, length: f64) -> usize {
        let index = self.ranges.partition_point(|range| range.end < length);
        index.min(self.ranges.len() - 1)
    }

    /// Position at `length` along the path.
    ///
    /// `length` is clamped to `[0, total_length]`. With `approximate`
    /// set, the two nearest table samples are blended linearly instead of
    /// re-evaluating the curve.
    #[must_use]
    pub fn point_at_length(&self, length: f64, approximate: bool) -> Point {
        match self.resolve(length, approximate) {
            Resolution::Sample(index) => self.samples[index].point,
            Resolution::Blend { from, to, mix } => {
                self.samples[from].point.lerp(self.samples[to].point, mix)
            }
            Resolution::Curve { segment, t } => self.segments[segment].point_at_parameter(t),
        }
    }

    /// Unit tangent at `length` along the path.
    ///
    /// Same clamping and `approximate` behaviour as
    /// [`point_at_length`](Self::point_at_length). The result may be
    /// near-zero where the curve's derivative degenerates.
    #[must_use]
    pub fn tangent_at_length(&self, length: f64, approximate: bool) -> Point {
        match self.resolve(length, approximate) {
            Resolution::Sample(index) => self.samples[index].tangent,
            Resolution::Blend { from, to, mix } => {
                let blended = self.samples[from].tangent.lerp(self.samples[to].tangent, mix);
                let len = blended.length().max(TANGENT_EPSILON);
                Point::new(blended.x / len, blended.y / len)
            }
            Resolution::Curve { segment, t } => self.segments[segment].tangent_at_parameter(t),
        }
    }

    /// Direction of travel at `length`, in radians from the +x axis.
    #[must_use]
    pub fn angle_at_length(&self, length: f64, approximate: bool) -> f64 {
        let tangent = self.tangent_at_length(length, approximate);
        tangent.y.atan2(tangent.x)
    }

    /// `count` points at evenly spaced distances from the start to the end
    /// of the path, both included.
    #[must_use]
    pub fn sample_evenly(&self, count: usize, approximate: bool) -> Vec<Point> {
        match count {
            0 => Vec::new(),
            1 => vec![self.start()],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let step = self.total_length / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let length = if i + 1 == count {
                            self.total_length
                        } else {
                            step * i as f64
                        };
                        self.point_at_length(length, approximate)
                    })
                    .collect()
            }
        }
    }

    /// Decide how to answer a query at `length`.
    fn resolve(&self, length: f64, approximate: bool) -> Resolution {
        let last = self.samples.len() - 1;
        if length.is_nan() || length <= 0.0 {
            return Resolution::Sample(0);
        }
        if length >= self.total_length {
            return Resolution::Sample(last);
        }

        let from = self.closest_sample_index(length);
        let to = if self.samples[from].distance < length {
            (from + 1).min(last)
        } else {
            from.saturating_sub(1)
        };
        let a = &self.samples[from];
        let b = &self.samples[to];

        let span = b.distance - a.distance;
        let mix = if span.abs() < MIX_EPSILON {
            0.0
        } else {
            (length - a.distance) / span
        };

        // Out-of-order segments only show up when the search lands on the
        // far side of a jump's synthetic samples.
        if approximate || a.segment > b.segment {
            Resolution::Blend { from, to, mix }
        } else if a.segment != b.segment {
            // Coordinates are discontinuous here, so walk the parameter of
            // whichever segment is nearer instead of blending positions.
            if mix < 0.5 {
                let m = 2.0 * mix;
                Resolution::Curve {
                    segment: a.segment,
                    t: (1.0 - m).mul_add(a.t, m),
                }
            } else {
                Resolution::Curve {
                    segment: b.segment,
                    t: 2.0 * (mix - 0.5) * b.t,
                }
            }
        } else {
            Resolution::Curve {
                segment: a.segment,
                t: (1.0 - mix).mul_add(a.t, mix * b.t),
            }
        }
    }

    /// Binary search for a sample whose distance is closest to `length`.
    ///
    /// Returns immediately on an exact match; otherwise returns the
    /// clamped midpoint of the final search window, which is adjacent to
    /// `length` but may lie on either side of it.
    fn closest_sample_index(&self, length: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.samples.len() - 1;

        while lo < hi {
            let mid = usize::midpoint(lo, hi);
            let distance = self.samples[mid].distance;

            if distance > length {
                if mid == 0 {
                    return 0;
                }
                hi = mid - 1;
            } else if distance < length {
                lo = mid + 1;
            } else {
                return mid;
            }
        }

        usize::midpoint(lo, hi).min(self.samples.len() - 1)
    }
}

/// Starting distance of every segment, plus the total path length.
fn segment_offsets(segments: &[Segment]) -> (Vec<f64>, f64) {
    let mut offsets = Vec::with_capacity(segments.len());
    let mut total = 0.0;
    for segment in segments {
        offsets.push(total);
        total += segment.total_length();
    }
    (offsets, total)
}

/// Number of table intervals for a segment of the given length.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn interval_count(length: f64, spacing: f64) -> usize {
    ((length / spacing).ceil() as usize).clamp(MIN_SEGMENT_SAMPLES, MAX_SEGMENT_SAMPLES)
}

/// Euclidean distances between consecutive points.
fn chord_lengths(points: &[Point]) -> Vec<f64> {
    points.windows(2).map(|w| w[0].distance(w[1])).collect()
}

/// Build the per-segment samples, merged in path order and preceded by
/// a sample at the path start.
fn resample(
    segments: &[Segment],
    offsets: &[f64],
    total_length: f64,
    config: &SamplerConfig,
) -> Vec<Sample> {
    let counts: Vec<usize> = segments
        .iter()
        .map(|s| interval_count(s.total_length(), config.sample_spacing))
        .collect();
    let total_count: usize = counts.iter().sum();

    #[allow(clippy::cast_precision_loss)]
    let total_count = total_count as f64;
    let target_spacing = total_length / total_count;
    let step = 1.0 / (total_count * 10.0);

    let first = &segments[0];
    let mut samples = Vec::with_capacity(counts.iter().sum::<usize>() + 1);
    samples.push(Sample {
        distance: 0.0,
        point: first.start(),
        tangent: first.tangent_at_parameter(0.0),
        segment: 0,
        t: 0.0,
    });

    for (index, ((segment, &count), &offset)) in
        segments.iter().zip(&counts).zip(offsets).enumerate()
    {
        trace!(
            "segment {index}: {count} intervals over length {:.3}",
            segment.total_length()
        );

        let (params, points) = relax_parameters(
            segment,
            count,
            target_spacing,
            step,
            config.refinement_passes,
        );

        let gaps = chord_lengths(&points);
        let chord_total: f64 = gaps.iter().sum();
        let mut travelled = 0.0;

        // The first point duplicates the previous segment's end (or the
        // path start) and is skipped.
        for (i, (&gap, (&t, &point))) in gaps
            .iter()
            .zip(params.iter().zip(&points).skip(1))
            .enumerate()
        {
            travelled += gap;
            #[allow(clippy::cast_precision_loss)]
            let ratio = if chord_total > 0.0 {
                travelled / chord_total
            } else {
                (i + 1) as f64 / count as f64
            };
            samples.push(Sample {
                distance: segment.total_length().mul_add(ratio, offset),
                point,
                tangent: segment.tangent_at_parameter(t),
                segment: index,
                t,
            });
        }
    }

    samples
}

/// Spread `count + 1` curve parameters over a segment so that the
/// distances between their points approach `target_spacing`.
///
/// Endpoint parameters stay fixed at 0 and 1. Each pass walks the
/// interior parameters and pulls each one back by `step` times the
/// spacing error accumulated so far.
fn relax_parameters(
    segment: &Segment,
    count: usize,
    target_spacing: f64,
    step: f64,
    passes: usize,
) -> (Vec<f64>, Vec<Point>) {
    #[allow(clippy::cast_precision_loss)]
    let mut params: Vec<f64> = (0..=count).map(|i| i as f64 / count as f64).collect();
    let mut points: Vec<Point> = params
        .iter()
        .map(|&t| segment.point_at_parameter(t))
        .collect();

    for _ in 0..passes {
        let gaps = chord_lengths(&points);
        let mut drift = 0.0;
        for i in 1..count {
            drift += gaps[i - 1] - target_spacing;
            params[i] = step.mul_add(-drift, params[i]).clamp(0.0, 1.0);
            points[i] = segment.point_at_parameter(params[i]);
        }
    }

    (params, points)
}

/// Insert boundary samples wherever consecutive segments do not share an
/// endpoint, returning the final table and the jump distances.
fn splice_jumps(segments: &[Segment], table: &[Sample], epsilon: f64) -> (Vec<Sample>, Vec<f64>) {
    let mut samples = Vec::with_capacity(table.len());
    let mut jumps = Vec::new();

    samples.push(table[0]);
    for pair in table.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.segment != next.segment {
            let outgoing = &segments[prev.segment];
            let incoming = &segments[next.segment];
            if outgoing.end() != incoming.start() {
                let mid = f64::midpoint(prev.distance, next.distance);
                samples.push(Sample {
                    distance: (mid - epsilon).max(prev.distance),
                    point: outgoing.end(),
                    tangent: outgoing.tangent_at_parameter(1.0),
                    segment: prev.segment,
                    t: 1.0,
                });
                samples.push(Sample {
                    distance: (mid + epsilon).min(next.distance),
                    point: incoming.start(),
                    tangent: incoming.tangent_at_parameter(0.0),
                    segment: next.segment,
                    t: 0.0,
                });
                jumps.push(mid);
            }
        }
        samples.push(next);
    }

    (samples, jumps)
}
