use crate::common::*;
use bbox::{HW, XYXY};
use image::DynamicImage;
use label::Label;

/// A bounding box in pixel units paired with a class index.
pub type PixelLabel = Label<XYXY<R64>, usize>;

/// The record with image path and boxes, but without image pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Image size in pixels.
    pub size: HW<usize>,
    /// Bounding boxes in pixel units.
    pub bboxes: Vec<PixelLabel>,
}

/// The record with decoded image pixels and boxes.
#[derive(Debug, Clone)]
pub struct DataRecord {
    pub image: DynamicImage,
    pub bboxes: Vec<PixelLabel>,
}
