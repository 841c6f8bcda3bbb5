//! SVG elements and whole documents to paths.
//!
//! Supported elements are `<path>` (`d`), `<line>` (`x1`, `y1`, `x2`, `y2`)
//! and `<circle>` (`cx`, `cy`, `r`). Missing numeric attributes default to
//! 0. Transforms, styles and every other element are ignored.

use log::{debug, warn};
use pathwalk::{BezierPath, Point, Segment};
use svg::node::Attributes;
use svg::node::element::tag::Type;
use svg::parser::Event;

use crate::commands::segments_from_data;
use crate::shapes::circle_segments;
use crate::types::ConversionError;

/// One convertible element found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentShape {
    /// Element tag name.
    pub tag: String,
    /// The element's `id` attribute, if any.
    pub id: Option<String>,
    /// Converted segments.
    pub segments: Vec<Segment>,
}

impl DocumentShape {
    /// Human-readable label such as `path#outline` or `circle`.
    #[must_use]
    pub fn label(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| self.tag.clone(), |id| format!("{}#{id}", self.tag))
    }
}

/// Returns `true` if `tag` names an element this module can convert.
#[must_use]
pub fn is_supported_element(tag: &str) -> bool {
    matches!(tag, "path" | "line" | "circle")
}

/// Convert one element into segments.
///
/// `attribute` looks up an attribute value by name.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedElement`] for other tags,
/// [`ConversionError::MissingAttribute`] for a `<path>` without `d`,
/// [`ConversionError::InvalidAttribute`] for unparseable numbers or a
/// negative radius, and any error from converting the path data.
pub fn segments_from_element<'a>(
    tag: &str,
    attribute: impl Fn(&str) -> Option<&'a str>,
) -> Result<Vec<Segment>, ConversionError> {
    let number = |name: &str| numeric_attribute(name, attribute(name));

    match tag {
        "path" => {
            let d = attribute("d").ok_or_else(|| ConversionError::MissingAttribute {
                element: tag.to_owned(),
                attribute: "d".to_owned(),
            })?;
            segments_from_data(d)
        }
        "line" => {
            let from = Point::new(number("x1")?, number("y1")?);
            let to = Point::new(number("x2")?, number("y2")?);
            Ok(vec![Segment::line(from, to)])
        }
        "circle" => {
            let center = Point::new(number("cx")?, number("cy")?);
            let radius = number("r")?;
            if radius < 0.0 {
                return Err(ConversionError::InvalidAttribute {
                    attribute: "r".to_owned(),
                    value: radius.to_string(),
                });
            }
            Ok(circle_segments(center, radius).to_vec())
        }
        other => Err(ConversionError::UnsupportedElement(other.to_owned())),
    }
}

/// Build a path from one element.
///
/// # Errors
///
/// Same as [`segments_from_element`], plus any [`BezierPath::new`] error.
///
/// # Examples
///
/// ```
/// use pathwalk_svg::path_from_element;
///
/// let attributes = [("x1", "0"), ("y1", "0"), ("x2", "3"), ("y2", "4")];
/// let path = path_from_element("line", |name| {
///     attributes.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
/// })
/// .unwrap();
/// assert!((path.total_length() - 5.0).abs() < 1e-12);
/// ```
pub fn path_from_element<'a>(
    tag: &str,
    attribute: impl Fn(&str) -> Option<&'a str>,
) -> Result<BezierPath, ConversionError> {
    Ok(BezierPath::new(segments_from_element(tag, attribute)?)?)
}

/// Collect every `<path>`, `<line>` and `<circle>` in a document.
///
/// Elements that fail to convert are logged and skipped. Other elements
/// are ignored.
///
/// # Errors
///
/// Returns [`ConversionError::Parse`] if the document is not well-formed.
pub fn read_document(source: &str) -> Result<Vec<DocumentShape>, ConversionError> {
    let parser = svg::read(source).map_err(|e| ConversionError::Parse(e.to_string()))?;

    let mut shapes = Vec::new();
    for event in parser {
        match event {
            Event::Error(e) => return Err(ConversionError::Parse(e.to_string())),
            Event::Tag(tag, Type::Start | Type::Empty, attributes) if is_supported_element(tag) => {
                let lookup = |name: &str| attribute_value(&attributes, name);
                let id = lookup("id").map(str::to_owned);
                match segments_from_element(tag, lookup) {
                    Ok(segments) => shapes.push(DocumentShape {
                        tag: tag.to_owned(),
                        id,
                        segments,
                    }),
                    Err(e) => warn!(
                        "skipping <{tag}>{}: {e}",
                        id.map_or_else(String::new, |id| format!(" #{id}"))
                    ),
                }
            }
            _ => {}
        }
    }

    debug!("found {} convertible elements", shapes.len());
    Ok(shapes)
}

/// Build a path for every convertible element in a document, in document
/// order.
///
/// # Errors
///
/// Returns [`ConversionError::Parse`] if the document is not well-formed.
pub fn paths_from_document(source: &str) -> Result<Vec<BezierPath>, ConversionError> {
    read_document(source)?
        .into_iter()
        .map(|shape| BezierPath::new(shape.segments).map_err(ConversionError::from))
        .collect()
}

/// Look up an attribute of a parsed tag.
fn attribute_value<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    let value: &'a str = attributes.get(name)?;
    Some(value)
}

/// Parse a numeric attribute, defaulting to 0 when absent.
///
/// A trailing `px` unit is accepted.
fn numeric_attribute(name: &str, value: Option<&str>) -> Result<f64, ConversionError> {
    let Some(raw) = value else {
        return Ok(0.0);
    };
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConversionError::InvalidAttribute {
            attribute: name.to_owned(),
            value: raw.to_owned(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attrs<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
        move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    // --- numeric_attribute ---

    #[test]
    fn numeric_attribute_parsing() {
        assert!((numeric_attribute("x", Some(" 12.5 ")).unwrap() - 12.5).abs() < f64::EPSILON);
        assert!((numeric_attribute("x", Some("3px")).unwrap() - 3.0).abs() < f64::EPSILON);
        assert!(numeric_attribute("x", None).unwrap().abs() < f64::EPSILON);
        assert_eq!(
            numeric_attribute("x", Some("wide")).unwrap_err(),
            ConversionError::InvalidAttribute {
                attribute: "x".to_owned(),
                value: "wide".to_owned()
            }
        );
        assert!(numeric_attribute("x", Some("inf")).is_err());
    }

    // --- Elements ---

    #[test]
    fn line_element_defaults_missing_coordinates() {
        let segments = segments_from_element("line", attrs(&[("x2", "10")])).unwrap();
        assert_eq!(segments[0].start(), Point::new(0.0, 0.0));
        assert_eq!(segments[0].end(), Point::new(10.0, 0.0));
    }

    #[test]
    fn circle_element() {
        let path = path_from_element("circle", attrs(&[("cx", "50"), ("cy", "50"), ("r", "10")]))
            .unwrap();
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.start(), Point::new(40.0, 50.0));
        assert!(path.is_continuous());
    }

    #[test]
    fn negative_radius_is_invalid() {
        assert!(matches!(
            segments_from_element("circle", attrs(&[("r", "-1")])),
            Err(ConversionError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn path_element_requires_d() {
        assert_eq!(
            segments_from_element("path", attrs(&[])).unwrap_err(),
            ConversionError::MissingAttribute {
                element: "path".to_owned(),
                attribute: "d".to_owned()
            }
        );
    }

    #[test]
    fn path_element_uses_d() {
        let path = path_from_element("path", attrs(&[("d", "M 0 0 L 0 8")])).unwrap();
        assert!((path.total_length() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn unsupported_element() {
        assert_eq!(
            segments_from_element("rect", attrs(&[])).unwrap_err(),
            ConversionError::UnsupportedElement("rect".to_owned())
        );
        assert!(!is_supported_element("rect"));
    }

    // --- DocumentShape ---

    #[test]
    fn shape_label() {
        let mut shape = DocumentShape {
            tag: "path".to_owned(),
            id: None,
            segments: Vec::new(),
        };
        assert_eq!(shape.label(), "path");
        shape.id = Some("outline".to_owned());
        assert_eq!(shape.label(), "path#outline");
    }
}
