//! Parsing and validation of labelme-style annotation files.
//!
//! One annotation file describes one image: its pixel size and an ordered
//! list of labeled shapes, each shape being two opposite corners of an
//! axis-aligned box. [`parse_annotation_file`] turns such a file into
//! parallel label and box sequences, dropping shapes whose label carries the
//! exclusion token and rejecting geometrically inconsistent boxes.

use crate::common::*;
use bbox::{RectExt, HW, XYXY};
use std::fs;
use thiserror::Error;

/// Shapes whose label contains this token denote background categories and
/// are skipped during parsing.
pub const DEFAULT_EXCLUDE_TOKEN: &str = "Anomalia";

/// The on-disk annotation record for one image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnotationFile {
    #[serde(rename = "imageHeight")]
    pub image_height: usize,
    #[serde(rename = "imageWidth")]
    pub image_width: usize,
    pub shapes: Vec<Shape>,
}

/// One labeled shape: two opposite corners of an axis-aligned box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shape {
    pub label: String,
    pub points: [[R64; 2]; 2],
}

/// The coordinate axis a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn coord(&self) -> &'static str {
        match self {
            Axis::Horizontal => "x",
            Axis::Vertical => "y",
        }
    }

    fn extent(&self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }

    fn inverted_relation(&self) -> &'static str {
        match self {
            Axis::Horizontal => "xmin > xmax",
            Axis::Vertical => "ymin > ymax",
        }
    }
}

/// The reasons an annotation file fails to parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed annotation file '{}'", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error(
        "object {coord} coordinate larger than image {extent} in '{path}': shape {shape_index} with label '{label}'",
        coord = .axis.coord(),
        extent = .axis.extent(),
        path = .path.display()
    )]
    OutOfBounds {
        axis: Axis,
        path: PathBuf,
        shape_index: usize,
        label: String,
    },
    #[error(
        "{relation} in '{path}': shape {shape_index} with label '{label}'",
        relation = .axis.inverted_relation(),
        path = .path.display()
    )]
    InvertedOrder {
        axis: Axis,
        path: PathBuf,
        shape_index: usize,
        label: String,
    },
}

/// The parsed content of one annotation file. `labels[i]` describes
/// `boxes[i]`; both follow the source shape order minus excluded entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnnotation {
    /// Image size in pixels.
    pub size: HW<usize>,
    pub labels: Vec<String>,
    /// Bounding boxes in pixel units.
    pub boxes: Vec<XYXY<R64>>,
    /// Number of shapes skipped by the exclusion token.
    pub num_excluded: usize,
}

/// Reads and validates one annotation file.
///
/// A shape whose label contains `exclude_token` contributes neither a label
/// nor a box, and its coordinates are never inspected. Any geometric
/// violation on a kept shape aborts the whole parse; there is no partial
/// output. The function holds no state, so repeated and concurrent calls are
/// safe.
pub fn parse_annotation_file(
    path: impl AsRef<Path>,
    exclude_token: &str,
) -> Result<ParsedAnnotation, ParseError> {
    let path = path.as_ref();

    let malformed = |source: Box<dyn std::error::Error + Send + Sync>| ParseError::Malformed {
        path: path.to_owned(),
        source,
    };

    let text = fs::read_to_string(path).map_err(|err| malformed(err.into()))?;
    let annotation: AnnotationFile =
        serde_json::from_str(&text).map_err(|err| malformed(err.into()))?;

    parse_annotation(path, &annotation, exclude_token)
}

fn parse_annotation(
    path: &Path,
    annotation: &AnnotationFile,
    exclude_token: &str,
) -> Result<ParsedAnnotation, ParseError> {
    let AnnotationFile {
        image_height,
        image_width,
        ref shapes,
    } = *annotation;

    let height = r64(image_height as f64);
    let width = r64(image_width as f64);

    let mut labels = Vec::with_capacity(shapes.len());
    let mut boxes = Vec::with_capacity(shapes.len());
    let mut num_excluded = 0;

    for (shape_index, shape) in shapes.iter().enumerate() {
        if shape.label.contains(exclude_token) {
            num_excluded += 1;
            continue;
        }

        // The annotation tool stores the two clicked corners in a fixed
        // visual order: the first point carries xmin and ymax, the second
        // carries xmax and ymin. Deriving corners any other way would
        // silently change behavior against existing annotation files.
        let [[xmin, ymax], [xmax, ymin]] = shape.points;

        let out_of_bounds = |axis| ParseError::OutOfBounds {
            axis,
            path: path.to_owned(),
            shape_index,
            label: shape.label.clone(),
        };
        let inverted = |axis| ParseError::InvertedOrder {
            axis,
            path: path.to_owned(),
            shape_index,
            label: shape.label.clone(),
        };

        if ymin > height || ymax > height {
            return Err(out_of_bounds(Axis::Vertical));
        }
        if xmin > width || xmax > width {
            return Err(out_of_bounds(Axis::Horizontal));
        }
        if ymin > ymax {
            return Err(inverted(Axis::Vertical));
        }
        if xmin > xmax {
            return Err(inverted(Axis::Horizontal));
        }

        labels.push(shape.label.clone());
        boxes.push(XYXY::from_xyxy([xmin, ymin, xmax, ymax]));
    }

    debug_assert_eq!(labels.len(), boxes.len());

    Ok(ParsedAnnotation {
        size: HW::from_hw([image_height, image_width]),
        labels,
        boxes,
        num_excluded,
    })
}
