//! Drawing commands, control points and conversion errors.

use pathwalk::{PathError, Point};
use serde::{Deserialize, Serialize};

/// One absolute drawing instruction.
///
/// Serialized with a `type` tag holding the single-letter SVG command
/// name, e.g. `{"type": "L", "x": 10.0, "y": 0.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawingCommand {
    /// Start a new subpath at `(x, y)`.
    #[serde(rename = "M")]
    MoveTo { x: f64, y: f64 },

    /// Straight line to `(x, y)`.
    #[serde(rename = "L")]
    LineTo { x: f64, y: f64 },

    /// Horizontal line to `x`.
    #[serde(rename = "H")]
    Horizontal { x: f64 },

    /// Vertical line to `y`.
    #[serde(rename = "V")]
    Vertical { y: f64 },

    /// Cubic curve with controls `(x1, y1)`, `(x2, y2)` ending at `(x, y)`.
    #[serde(rename = "C")]
    Cubic {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },

    /// Quadratic curve with control `(x1, y1)` ending at `(x, y)`.
    #[serde(rename = "Q")]
    Quadratic { x1: f64, y1: f64, x: f64, y: f64 },

    /// Close the current subpath.
    #[serde(rename = "Z")]
    Close,
}

impl DrawingCommand {
    /// The SVG command letter for this command.
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            Self::MoveTo { .. } => 'M',
            Self::LineTo { .. } => 'L',
            Self::Horizontal { .. } => 'H',
            Self::Vertical { .. } => 'V',
            Self::Cubic { .. } => 'C',
            Self::Quadratic { .. } => 'Q',
            Self::Close => 'Z',
        }
    }
}

/// A point on a control-point chain with optional Bezier handles.
///
/// A missing handle collapses onto the point itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlPoint {
    /// The on-curve point.
    pub point: Point,
    /// Incoming handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Point>,
    /// Outgoing handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Point>,
}

impl ControlPoint {
    /// A corner point with no handles.
    #[must_use]
    pub const fn corner(point: Point) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }
}

/// Errors that can occur while converting SVG input into a path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Path data or the SVG document could not be parsed.
    #[error("failed to parse SVG: {0}")]
    Parse(String),

    /// The path uses a command that has no conversion (`S`, `T`, `A`).
    #[error("unsupported path command '{0}'; use only M, L, H, V, C, Q, Z")]
    UnsupportedCommand(char),

    /// Fewer than two drawing commands were supplied.
    #[error("path needs at least 2 commands, got {0}")]
    TooFewCommands(usize),

    /// The first command was not a move-to.
    #[error("path starts with '{0}' instead of 'M'")]
    MissingMoveTo(char),

    /// A command's parameter list is empty or not a whole number of
    /// parameter groups.
    #[error("command '{command}' takes groups of {expected} parameters, got {found}")]
    MissingParameters {
        /// The command letter as written.
        command: char,
        /// Parameters per group.
        expected: usize,
        /// Parameters supplied.
        found: usize,
    },

    /// The element has no conversion.
    #[error("unsupported SVG element <{0}>")]
    UnsupportedElement(String),

    /// A required attribute is missing.
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        /// Element tag name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An attribute value is not a usable number.
    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        /// Attribute name.
        attribute: String,
        /// Offending value.
        value: String,
    },

    /// The converted segments could not form a path.
    #[error(transparent)]
    Path(#[from] PathError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- DrawingCommand serde ---

    #[test]
    fn command_serializes_with_letter_tag() {
        let json = serde_json::to_value(DrawingCommand::LineTo { x: 10.0, y: 0.0 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "L", "x": 10.0, "y": 0.0}));

        let close = serde_json::to_value(DrawingCommand::Close).unwrap();
        assert_eq!(close, serde_json::json!({"type": "Z"}));
    }

    #[test]
    fn command_deserializes_from_object_list() {
        let json = r#"[
            {"type": "M", "x": 0, "y": 0},
            {"type": "Q", "x1": 5, "y1": 5, "x": 10, "y": 0},
            {"type": "H", "x": 20},
            {"type": "Z"}
        ]"#;
        let commands: Vec<DrawingCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[1],
            DrawingCommand::Quadratic {
                x1: 5.0,
                y1: 5.0,
                x: 10.0,
                y: 0.0
            }
        );
        assert_eq!(commands[2], DrawingCommand::Horizontal { x: 20.0 });
    }

    #[test]
    fn command_letters() {
        let letters: String = [
            DrawingCommand::MoveTo { x: 0.0, y: 0.0 },
            DrawingCommand::LineTo { x: 0.0, y: 0.0 },
            DrawingCommand::Horizontal { x: 0.0 },
            DrawingCommand::Vertical { y: 0.0 },
            DrawingCommand::Cubic {
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: 0.0,
                x: 0.0,
                y: 0.0,
            },
            DrawingCommand::Quadratic {
                x1: 0.0,
                y1: 0.0,
                x: 0.0,
                y: 0.0,
            },
            DrawingCommand::Close,
        ]
        .iter()
        .map(DrawingCommand::letter)
        .collect();
        assert_eq!(letters, "MLHVCQZ");
    }

    // --- ControlPoint ---

    #[test]
    fn control_point_handles_are_optional_in_json() {
        let cp: ControlPoint = serde_json::from_str(r#"{"point": {"x": 1, "y": 2}}"#).unwrap();
        assert_eq!(cp, ControlPoint::corner(Point::new(1.0, 2.0)));

        let json = serde_json::to_string(&cp).unwrap();
        assert!(!json.contains("left"));
    }

    // --- ConversionError ---

    #[test]
    fn error_messages() {
        assert_eq!(
            ConversionError::MissingMoveTo('L').to_string(),
            "path starts with 'L' instead of 'M'"
        );
        assert_eq!(
            ConversionError::MissingParameters {
                command: 'c',
                expected: 6,
                found: 4,
            }
            .to_string(),
            "command 'c' takes groups of 6 parameters, got 4"
        );
    }

    #[test]
    fn path_error_converts_transparently() {
        let err: ConversionError = PathError::NoSegments.into();
        assert_eq!(err, ConversionError::Path(PathError::NoSegments));
        assert_eq!(err.to_string(), PathError::NoSegments.to_string());
    }
}
