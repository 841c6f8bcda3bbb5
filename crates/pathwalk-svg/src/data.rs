//! SVG path data (`d` attribute) to absolute drawing commands.
//!
//! Tokenizing is done by the [`svg`] crate's path data parser. This
//! module resolves relative commands against the current point and splits
//! implicitly repeated parameter groups into one [`DrawingCommand`] each.
//! A move-to followed by extra coordinate pairs continues as line-tos, as
//! SVG requires.
//!
//! Coordinates come out of the [`svg`] parser as `f32` and are widened to
//! `f64`.

use svg::node::element::path::{Command, Data, Position};

use crate::types::{ConversionError, DrawingCommand};

/// Parse an SVG path `d` string into absolute drawing commands.
///
/// # Errors
///
/// Returns [`ConversionError::Parse`] if the string is not valid path data,
/// [`ConversionError::UnsupportedCommand`] for `S`, `T` and `A` (either
/// case) and [`ConversionError::MissingParameters`] if a command's
/// parameters do not form whole groups.
///
/// # Examples
///
/// ```
/// use pathwalk_svg::{DrawingCommand, parse_path_data};
///
/// let commands = parse_path_data("m 1 2 l 3 0 v 4").unwrap();
/// assert_eq!(
///     commands,
///     vec![
///         DrawingCommand::MoveTo { x: 1.0, y: 2.0 },
///         DrawingCommand::LineTo { x: 4.0, y: 2.0 },
///         DrawingCommand::Vertical { y: 6.0 },
///     ]
/// );
/// ```
pub fn parse_path_data(d: &str) -> Result<Vec<DrawingCommand>, ConversionError> {
    let data = Data::parse(d).map_err(|e| ConversionError::Parse(e.to_string()))?;

    let mut resolver = Resolver::default();
    for command in data.iter() {
        resolver.push(command)?;
    }
    Ok(resolver.commands)
}

/// Tracks the pen while turning parsed commands into absolute ones.
#[derive(Default)]
struct Resolver {
    commands: Vec<DrawingCommand>,
    x: f64,
    y: f64,
    start_x: f64,
    start_y: f64,
}

impl Resolver {
    fn push(&mut self, command: &Command) -> Result<(), ConversionError> {
        match command {
            Command::Move(position, params) => {
                let letter = letter('M', *position);
                for (i, group) in groups(letter, params, 2)?.enumerate() {
                    let (x, y) = self.resolve(*position, group[0], group[1]);
                    if i == 0 {
                        self.start_x = x;
                        self.start_y = y;
                        self.commands.push(DrawingCommand::MoveTo { x, y });
                    } else {
                        self.commands.push(DrawingCommand::LineTo { x, y });
                    }
                    self.x = x;
                    self.y = y;
                }
            }
            Command::Line(position, params) => {
                for group in groups(letter('L', *position), params, 2)? {
                    let (x, y) = self.resolve(*position, group[0], group[1]);
                    self.commands.push(DrawingCommand::LineTo { x, y });
                    self.x = x;
                    self.y = y;
                }
            }
            Command::HorizontalLine(position, params) => {
                for group in groups(letter('H', *position), params, 1)? {
                    let mut x = f64::from(group[0]);
                    if *position == Position::Relative {
                        x += self.x;
                    }
                    self.commands.push(DrawingCommand::Horizontal { x });
                    self.x = x;
                }
            }
            Command::VerticalLine(position, params) => {
                for group in groups(letter('V', *position), params, 1)? {
                    let mut y = f64::from(group[0]);
                    if *position == Position::Relative {
                        y += self.y;
                    }
                    self.commands.push(DrawingCommand::Vertical { y });
                    self.y = y;
                }
            }
            Command::CubicCurve(position, params) => {
                for group in groups(letter('C', *position), params, 6)? {
                    let (x1, y1) = self.resolve(*position, group[0], group[1]);
                    let (x2, y2) = self.resolve(*position, group[2], group[3]);
                    let (x, y) = self.resolve(*position, group[4], group[5]);
                    self.commands.push(DrawingCommand::Cubic {
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y,
                    });
                    self.x = x;
                    self.y = y;
                }
            }
            Command::QuadraticCurve(position, params) => {
                for group in groups(letter('Q', *position), params, 4)? {
                    let (x1, y1) = self.resolve(*position, group[0], group[1]);
                    let (x, y) = self.resolve(*position, group[2], group[3]);
                    self.commands.push(DrawingCommand::Quadratic { x1, y1, x, y });
                    self.x = x;
                    self.y = y;
                }
            }
            Command::Close => {
                self.commands.push(DrawingCommand::Close);
                self.x = self.start_x;
                self.y = self.start_y;
            }
            Command::SmoothCubicCurve(position, _) => {
                return Err(ConversionError::UnsupportedCommand(letter('S', *position)));
            }
            Command::SmoothQuadraticCurve(position, _) => {
                return Err(ConversionError::UnsupportedCommand(letter('T', *position)));
            }
            Command::EllipticalArc(position, _) => {
                return Err(ConversionError::UnsupportedCommand(letter('A', *position)));
            }
        }
        Ok(())
    }

    /// Resolve a coordinate pair against the current point.
    fn resolve(&self, position: Position, x: f32, y: f32) -> (f64, f64) {
        let (x, y) = (f64::from(x), f64::from(y));
        match position {
            Position::Absolute => (x, y),
            Position::Relative => (self.x + x, self.y + y),
        }
    }
}

/// The command letter as written: upper case when absolute.
const fn letter(upper: char, position: Position) -> char {
    match position {
        Position::Absolute => upper,
        Position::Relative => upper.to_ascii_lowercase(),
    }
}

/// Split `params` into groups of `size`, rejecting partial groups.
fn groups(
    command: char,
    params: &[f32],
    size: usize,
) -> Result<std::slice::ChunksExact<'_, f32>, ConversionError> {
    if params.is_empty() || !params.len().is_multiple_of(size) {
        return Err(ConversionError::MissingParameters {
            command,
            expected: size,
            found: params.len(),
        });
    }
    Ok(params.chunks_exact(size))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Absolute commands ---

    #[test]
    fn absolute_commands_pass_through() {
        let commands = parse_path_data("M 0 0 L 10 0 H 20 V 5 C 1 2 3 4 5 6 Q 7 8 9 10 Z").unwrap();
        assert_eq!(
            commands,
            vec![
                DrawingCommand::MoveTo { x: 0.0, y: 0.0 },
                DrawingCommand::LineTo { x: 10.0, y: 0.0 },
                DrawingCommand::Horizontal { x: 20.0 },
                DrawingCommand::Vertical { y: 5.0 },
                DrawingCommand::Cubic {
                    x1: 1.0,
                    y1: 2.0,
                    x2: 3.0,
                    y2: 4.0,
                    x: 5.0,
                    y: 6.0
                },
                DrawingCommand::Quadratic {
                    x1: 7.0,
                    y1: 8.0,
                    x: 9.0,
                    y: 10.0
                },
                DrawingCommand::Close,
            ]
        );
    }

    #[test]
    fn compact_syntax_parses() {
        let commands = parse_path_data("M0,0L10,0L10-5").unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[2], DrawingCommand::LineTo { x: 10.0, y: -5.0 });
    }

    // --- Relative commands ---

    #[test]
    fn relative_commands_resolve_against_pen() {
        let relative = parse_path_data("m 0 0 l 10 0 l 0 10").unwrap();
        let absolute = parse_path_data("M 0 0 L 10 0 L 10 10").unwrap();
        assert_eq!(relative, absolute);
    }

    #[test]
    fn relative_curve_controls_use_segment_start() {
        let commands = parse_path_data("M 10 10 c 1 0 2 0 3 3").unwrap();
        assert_eq!(
            commands[1],
            DrawingCommand::Cubic {
                x1: 11.0,
                y1: 10.0,
                x2: 12.0,
                y2: 10.0,
                x: 13.0,
                y: 13.0
            }
        );
    }

    #[test]
    fn close_returns_pen_to_subpath_start() {
        let commands = parse_path_data("M 5 5 l 10 0 l 0 10 z l 1 1").unwrap();
        assert_eq!(commands[4], DrawingCommand::LineTo { x: 6.0, y: 6.0 });
    }

    #[test]
    fn relative_h_and_v() {
        let commands = parse_path_data("M 1 1 h 4 v -2 h -1").unwrap();
        assert_eq!(
            &commands[1..],
            &[
                DrawingCommand::Horizontal { x: 5.0 },
                DrawingCommand::Vertical { y: -1.0 },
                DrawingCommand::Horizontal { x: 4.0 },
            ]
        );
    }

    // --- Repeated parameter groups ---

    #[test]
    fn extra_move_pairs_become_lines() {
        let commands = parse_path_data("M 0 0 10 0 10 10").unwrap();
        assert_eq!(
            commands,
            vec![
                DrawingCommand::MoveTo { x: 0.0, y: 0.0 },
                DrawingCommand::LineTo { x: 10.0, y: 0.0 },
                DrawingCommand::LineTo { x: 10.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn repeated_relative_moves_chain() {
        let commands = parse_path_data("m 1 1 2 0 0 2").unwrap();
        assert_eq!(commands[2], DrawingCommand::LineTo { x: 3.0, y: 3.0 });
    }

    #[test]
    fn repeated_curves_split() {
        let commands = parse_path_data("M 0 0 Q 1 1 2 0 3 -1 4 0").unwrap();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[2], DrawingCommand::Quadratic { x, .. } if (x - 4.0).abs() < f64::EPSILON));
    }

    // --- Errors ---

    #[test]
    fn arcs_are_unsupported() {
        assert_eq!(
            parse_path_data("M 0 0 A 5 5 0 0 1 10 0").unwrap_err(),
            ConversionError::UnsupportedCommand('A')
        );
    }

    #[test]
    fn smooth_curves_are_unsupported() {
        assert_eq!(
            parse_path_data("M 0 0 s 1 1 2 2").unwrap_err(),
            ConversionError::UnsupportedCommand('s')
        );
        assert_eq!(
            parse_path_data("M 0 0 Q 1 1 2 0 T 4 0").unwrap_err(),
            ConversionError::UnsupportedCommand('T')
        );
    }

    #[test]
    fn partial_group_is_rejected() {
        assert_eq!(
            parse_path_data("M 0 0 C 1 1 2 2").unwrap_err(),
            ConversionError::MissingParameters {
                command: 'C',
                expected: 6,
                found: 4
            }
        );
    }
}
