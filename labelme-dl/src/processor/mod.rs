//! Augmentation applied to records while loading.

pub mod flip;
pub use flip::*;

use crate::{common::*, dataset::PixelLabel};
use image::DynamicImage;

/// The augmentation capability injected into an
/// [`AugmentedDataset`](crate::dataset::AugmentedDataset). Implementations
/// receive the decoded image together with its boxes and must keep the two
/// consistent.
pub trait Augmenter
where
    Self: Debug + Send + Sync,
{
    fn augment(
        &self,
        image: DynamicImage,
        bboxes: Vec<PixelLabel>,
    ) -> Result<(DynamicImage, Vec<PixelLabel>)>;
}

/// The augmenter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Augmenter for Identity {
    fn augment(
        &self,
        image: DynamicImage,
        bboxes: Vec<PixelLabel>,
    ) -> Result<(DynamicImage, Vec<PixelLabel>)> {
        Ok((image, bboxes))
    }
}
