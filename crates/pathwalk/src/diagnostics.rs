//! Lookup table diagnostics: construction timing, counts and spacing
//! statistics.
//!
//! These diagnostics are permanent instrumentation for tuning
//! [`SamplerConfig`]. [`build_with_diagnostics`] builds a path and reports
//! how close the resulting table came to uniform spacing.
//!
//! Duration measurements use [`std::time::Duration`] (platform-agnostic).
//! Timestamps are captured internally via the `web-time` crate, which
//! uses `performance.now()` on WASM and `std::time::Instant` on native.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::path::BezierPath;
use crate::segment::Segment;
use crate::types::{PathError, SamplerConfig};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Summary statistics over the distance gaps between table samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpacingStats {
    /// Number of gaps measured.
    pub count: usize,
    /// Mean gap.
    pub mean: f64,
    /// Population standard deviation of the gaps.
    pub std_dev: f64,
    /// Smallest gap.
    pub min: f64,
    /// Largest gap.
    pub max: f64,
}

impl SpacingStats {
    /// Compute statistics over `gaps`. Empty input yields all zeros.
    #[must_use]
    pub fn from_gaps(gaps: &[f64]) -> Self {
        if gaps.is_empty() {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let n = gaps.len() as f64;
        let mean = gaps.iter().sum::<f64>() / n;
        let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
        let min = gaps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: gaps.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }

    /// Gaps between consecutive samples that belong to the same segment.
    ///
    /// The two synthetic samples spliced in at each jump are skipped so
    /// their ε-wide gap does not skew the statistics.
    #[must_use]
    pub fn of_path(path: &BezierPath) -> Self {
        let segments = path.segments();
        let samples = path.samples();

        let mut synthetic = vec![false; samples.len()];
        for (i, w) in samples.windows(2).enumerate() {
            if w[0].segment != w[1].segment
                && segments[w[0].segment].end() != segments[w[1].segment].start()
            {
                synthetic[i] = true;
                synthetic[i + 1] = true;
            }
        }

        let gaps: Vec<f64> = samples
            .windows(2)
            .enumerate()
            .filter(|(i, w)| w[0].segment == w[1].segment && !synthetic[*i] && !synthetic[i + 1])
            .map(|(_, w)| w[1].distance - w[0].distance)
            .collect();
        Self::from_gaps(&gaps)
    }

    /// Standard deviation relative to the mean (0 when the mean is 0).
    #[must_use]
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }
}

/// Diagnostics collected from a single path construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDiagnostics {
    /// Number of input segments.
    pub segment_count: usize,
    /// Number of samples in the lookup table, synthetic jump samples included.
    pub sample_count: usize,
    /// Number of discontinuities between consecutive segments.
    pub jump_count: usize,
    /// Total path length.
    pub total_length: f64,
    /// Same-segment table spacing.
    pub spacing: SpacingStats,
    /// Wall-clock duration of construction (seconds).
    #[serde(with = "duration_serde")]
    pub build_duration: Duration,
}

impl PathDiagnostics {
    /// Collect diagnostics for an already built path.
    #[must_use]
    pub fn from_path(path: &BezierPath, build_duration: Duration) -> Self {
        Self {
            segment_count: path.segment_count(),
            sample_count: path.samples().len(),
            jump_count: path.jumps().len(),
            total_length: path.total_length(),
            spacing: SpacingStats::of_path(path),
            build_duration,
        }
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Path Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Segments: {}  |  Samples: {}  |  Jumps: {}",
            self.segment_count, self.sample_count, self.jump_count,
        ));
        lines.push(format!("Total length: {:.3}", self.total_length));
        lines.push(format!(
            "Build duration: {:.3}ms",
            duration_ms(self.build_duration),
        ));
        lines.push(String::new());

        let s = &self.spacing;
        lines.push(format!(
            "Spacing over {} gaps: mean={:.4} std={:.4} ({:.1}%) min={:.4} max={:.4}",
            s.count,
            s.mean,
            s.std_dev,
            s.coefficient_of_variation() * 100.0,
            s.min,
            s.max,
        ));

        lines.join("\n")
    }
}

/// Build a path and report on the resulting lookup table.
///
/// # Errors
///
/// Returns any error from [`BezierPath::with_config`].
pub fn build_with_diagnostics(
    segments: Vec<Segment>,
    config: &SamplerConfig,
) -> Result<(BezierPath, PathDiagnostics), PathError> {
    let start = web_time::Instant::now();
    let path = BezierPath::with_config(segments, config)?;
    let elapsed = start.elapsed();

    let diagnostics = PathDiagnostics::from_path(&path, elapsed);
    log::debug!(
        "path built in {:.3}ms, spacing cv {:.3}",
        duration_ms(elapsed),
        diagnostics.spacing.coefficient_of_variation(),
    );
    Ok((path, diagnostics))
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
