//! Drawing commands and control-point chains to Bezier segments.
//!
//! Lines are encoded as degenerate cubics (first control point on the
//! start, second on the end) and quadratics are degree-elevated. A move-to
//! inside a command list starts a new subpath without adding a segment, so
//! the path jumps from the previous pen position to the new one.

use pathwalk::{BezierPath, PathError, Point, Segment};

use crate::data::parse_path_data;
use crate::types::{ControlPoint, ConversionError, DrawingCommand};

/// Convert drawing commands into segments.
///
/// Line commands that do not move the pen, and a close on a subpath that
/// already ends at its start, add no segment.
///
/// # Errors
///
/// Returns [`ConversionError::TooFewCommands`] for fewer than two commands,
/// [`ConversionError::MissingMoveTo`] if the first command is not a
/// move-to, and [`PathError::NoSegments`] (wrapped) if nothing drawable
/// remains.
pub fn segments_from_commands(
    commands: &[DrawingCommand],
) -> Result<Vec<Segment>, ConversionError> {
    if commands.len() < 2 {
        return Err(ConversionError::TooFewCommands(commands.len()));
    }
    let (mut pen, mut subpath_start) = match commands[0] {
        DrawingCommand::MoveTo { x, y } => (Point::new(x, y), Point::new(x, y)),
        other => return Err(ConversionError::MissingMoveTo(other.letter())),
    };

    let mut segments = Vec::with_capacity(commands.len() - 1);

    for command in &commands[1..] {
        pen = match *command {
            DrawingCommand::MoveTo { x, y } => {
                subpath_start = Point::new(x, y);
                subpath_start
            }
            DrawingCommand::LineTo { x, y } => push_line(pen, Point::new(x, y), &mut segments),
            DrawingCommand::Horizontal { x } => push_line(pen, Point::new(x, pen.y), &mut segments),
            DrawingCommand::Vertical { y } => push_line(pen, Point::new(pen.x, y), &mut segments),
            DrawingCommand::Cubic {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let end = Point::new(x, y);
                segments.push(Segment::new(
                    pen,
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    end,
                ));
                end
            }
            DrawingCommand::Quadratic { x1, y1, x, y } => {
                let end = Point::new(x, y);
                segments.push(Segment::quadratic(pen, Point::new(x1, y1), end));
                end
            }
            DrawingCommand::Close => push_line(pen, subpath_start, &mut segments),
        };
    }

    if segments.is_empty() {
        return Err(PathError::NoSegments.into());
    }
    Ok(segments)
}

/// Append a line from `pen` to `target` unless they coincide, returning
/// the new pen position.
fn push_line(pen: Point, target: Point, segments: &mut Vec<Segment>) -> Point {
    if target != pen {
        segments.push(Segment::line(pen, target));
    }
    target
}

/// Build a path from drawing commands.
///
/// # Errors
///
/// See [`segments_from_commands`]; also returns any
/// [`BezierPath::new`] error.
///
/// # Examples
///
/// ```
/// use pathwalk_svg::{DrawingCommand, path_from_commands};
///
/// let path = path_from_commands(&[
///     DrawingCommand::MoveTo { x: 0.0, y: 0.0 },
///     DrawingCommand::Horizontal { x: 10.0 },
///     DrawingCommand::Vertical { y: 10.0 },
///     DrawingCommand::Close,
/// ])
/// .unwrap();
/// assert_eq!(path.segment_count(), 3);
/// ```
pub fn path_from_commands(commands: &[DrawingCommand]) -> Result<BezierPath, ConversionError> {
    Ok(BezierPath::new(segments_from_commands(commands)?)?)
}

/// Parse an SVG `d` string and convert it into segments.
///
/// # Errors
///
/// Any error from [`parse_path_data`] or [`segments_from_commands`].
pub fn segments_from_data(d: &str) -> Result<Vec<Segment>, ConversionError> {
    segments_from_commands(&parse_path_data(d)?)
}

/// Build a path from an SVG `d` string.
///
/// # Errors
///
/// Any error from [`parse_path_data`] or [`path_from_commands`].
pub fn path_from_data(d: &str) -> Result<BezierPath, ConversionError> {
    Ok(BezierPath::new(segments_from_data(d)?)?)
}

/// Convert a chain of control points into one cubic per consecutive pair.
#[must_use]
pub fn segments_from_control_points(points: &[ControlPoint]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            Segment::new(
                prev.point,
                prev.right.unwrap_or(prev.point),
                curr.left.unwrap_or(curr.point),
                curr.point,
            )
        })
        .collect()
}

/// Build a path through a chain of control points.
///
/// # Errors
///
/// Returns [`PathError::NoSegments`] (wrapped) for fewer than two points.
pub fn path_from_control_points(points: &[ControlPoint]) -> Result<BezierPath, ConversionError> {
    Ok(BezierPath::new(segments_from_control_points(points))?)
}
