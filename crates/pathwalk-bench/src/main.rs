//! pathwalk-bench: CLI tool for sampler parameter experimentation and diagnostics.
//!
//! Loads an SVG file, builds a lookup table for every `<path>`, `<line>`
//! and `<circle>` in it, and prints per-path diagnostics. Useful for:
//!
//! - Tuning sample spacing and the number of relaxation passes
//! - Checking how evenly spaced a table ends up for a given drawing
//! - Finding discontinuities (jumps) in path data
//! - Printing evenly spaced points along each path
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin pathwalk-bench -- [OPTIONS] <SVG_PATH>
//! ```
//!
//! Set `RUST_LOG=debug` for table construction logs.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pathwalk::{BezierPath, PathDiagnostics, SamplerConfig, build_with_diagnostics};
use serde::Serialize;

/// Sampler parameter experimentation and diagnostics for pathwalk.
///
/// Builds an arc-length lookup table for every supported shape in an SVG
/// document and prints table size, spacing statistics and timing.
#[derive(Parser)]
#[command(name = "pathwalk-bench", version)]
struct Cli {
    /// Path to the input SVG document.
    svg_path: PathBuf,

    /// Target distance between table samples.
    #[arg(long, default_value_t = SamplerConfig::DEFAULT_SAMPLE_SPACING)]
    sample_spacing: f64,

    /// Number of relaxation passes.
    #[arg(long, default_value_t = SamplerConfig::DEFAULT_REFINEMENT_PASSES)]
    refinement_passes: usize,

    /// Offset of the boundary samples around a jump.
    #[arg(long, default_value_t = SamplerConfig::DEFAULT_JUMP_EPSILON)]
    jump_epsilon: f64,

    /// Full sampler config as a JSON string.
    ///
    /// When provided, all other sampler parameter flags are ignored.
    /// The JSON must be a valid `SamplerConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Print this many evenly spaced points along each path.
    #[arg(long, default_value_t = 0)]
    samples: usize,

    /// Blend table samples instead of re-evaluating curves for `--samples`.
    #[arg(long)]
    approximate: bool,

    /// Number of builds per path for averaging construction time.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,
}

/// Results for one shape, as emitted with `--json`.
#[derive(Serialize)]
struct ShapeReport {
    label: String,
    diagnostics: PathDiagnostics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    samples: Vec<SampledPoint>,
}

/// A point sampled along a path.
#[derive(Serialize)]
struct SampledPoint {
    distance: f64,
    x: f64,
    y: f64,
    angle: f64,
}

/// Build a [`SamplerConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored. Either way the result is
/// validated before use.
fn config_from_cli(cli: &Cli) -> Result<SamplerConfig, String> {
    let config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"))?
    } else {
        SamplerConfig {
            sample_spacing: cli.sample_spacing,
            refinement_passes: cli.refinement_passes,
            jump_epsilon: cli.jump_epsilon,
        }
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// `count` evenly spaced points along `path` with their heading.
fn sample_points(path: &BezierPath, count: usize, approximate: bool) -> Vec<SampledPoint> {
    if count == 0 {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let step = if count > 1 {
        path.total_length() / (count - 1) as f64
    } else {
        0.0
    };
    path.sample_evenly(count, approximate)
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            #[allow(clippy::cast_precision_loss)]
            let distance = (step * i as f64).min(path.total_length());
            SampledPoint {
                distance,
                x: point.x,
                y: point.y,
                angle: path.angle_at_length(distance, approximate),
            }
        })
        .collect()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source = match std::fs::read_to_string(&cli.svg_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.svg_path.display());
            return ExitCode::FAILURE;
        }
    };

    let shapes = match pathwalk_svg::read_document(&source) {
        Ok(shapes) => shapes,
        Err(e) => {
            eprintln!("Error converting {}: {e}", cli.svg_path.display());
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Document: {} ({} bytes, {} shapes)",
        cli.svg_path.display(),
        source.len(),
        shapes.len(),
    );
    eprintln!("Config: {config:#?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut reports = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let label = shape.label();
        let mut build_times = Vec::with_capacity(cli.runs);
        let mut built = None;

        for _ in 0..cli.runs {
            match build_with_diagnostics(shape.segments.clone(), &config) {
                Ok((path, diagnostics)) => {
                    build_times.push(diagnostics.build_duration.as_secs_f64() * 1000.0);
                    built = Some((path, diagnostics));
                }
                Err(e) => {
                    eprintln!("Error building {label}: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let Some((path, diagnostics)) = built else {
            continue;
        };
        log::debug!(
            "{label}: {} samples, {} jumps",
            diagnostics.sample_count,
            diagnostics.jump_count
        );
        let samples = sample_points(&path, cli.samples, cli.approximate);

        if !cli.json {
            println!("[{label}]");
            println!("{}", diagnostics.report());
            if cli.runs > 1 {
                print_build_time_summary(&build_times);
            }
            if !samples.is_empty() {
                println!();
                println!(
                    "{:>12} {:>12} {:>12} {:>10}",
                    "Distance", "X", "Y", "Angle"
                );
                for s in &samples {
                    println!(
                        "{:>12.4} {:>12.4} {:>12.4} {:>10.4}",
                        s.distance, s.x, s.y, s.angle
                    );
                }
            }
            println!();
        }

        reports.push(ShapeReport {
            label,
            diagnostics,
            samples,
        });
    }

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing diagnostics: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Print build time statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_build_time_summary(durations: &[f64]) {
    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len().max(1) as f64;

    println!(
        "Build time over {} runs: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms",
        durations.len()
    );
}
