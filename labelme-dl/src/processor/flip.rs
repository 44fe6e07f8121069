use super::Augmenter;
use crate::{common::*, dataset::PixelLabel};
use bbox::Transform;
use image::DynamicImage;

/// The augmenter that mirrors the image over its vertical axis and maps the
/// boxes through the matching transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalFlip;

impl Augmenter for HorizontalFlip {
    fn augment(
        &self,
        image: DynamicImage,
        bboxes: Vec<PixelLabel>,
    ) -> Result<(DynamicImage, Vec<PixelLabel>)> {
        let transform = Transform::horizontal_flip(r64(image.width() as f64));
        let bboxes = bboxes.iter().map(|bbox| &transform * bbox).collect();
        Ok((image.fliph(), bboxes))
    }
}
