//! pathwalk-svg: SVG input for pathwalk (sans-IO).
//!
//! Converts SVG path data, drawing commands, control-point chains,
//! `<line>`/`<circle>` shapes and whole SVG documents into
//! [`BezierPath`](pathwalk::BezierPath)s. Parsing is delegated to the
//! [`svg`] crate; this crate resolves relative commands, encodes lines and
//! quadratics as cubic segments and reports unsupported input through
//! [`ConversionError`].
//!
//! Supported path commands are `M`, `L`, `H`, `V`, `C`, `Q` and `Z` in
//! both absolute and relative form. Smooth curves (`S`, `T`) and arcs
//! (`A`) are rejected.

pub mod commands;
pub mod data;
pub mod document;
pub mod shapes;
pub mod types;

pub use commands::{
    path_from_commands, path_from_control_points, path_from_data, segments_from_commands,
    segments_from_control_points, segments_from_data,
};
pub use data::parse_path_data;
pub use document::{
    DocumentShape, is_supported_element, path_from_element, paths_from_document, read_document,
    segments_from_element,
};
pub use shapes::{circle, circle_segments, line};
pub use types::{ControlPoint, ConversionError, DrawingCommand};
