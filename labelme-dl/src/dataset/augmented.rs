use super::*;
use crate::{common::*, processor::Augmenter};

/// The dataset that decodes image files on access and runs each record
/// through an injected augmenter.
#[derive(Debug)]
pub struct AugmentedDataset<D, A>
where
    D: FileDataset,
    A: Augmenter,
{
    dataset: D,
    augmenter: Arc<A>,
}

impl<D, A> AugmentedDataset<D, A>
where
    D: FileDataset,
    A: Augmenter,
{
    pub fn new(dataset: D, augmenter: A) -> Self {
        Self {
            dataset,
            augmenter: Arc::new(augmenter),
        }
    }
}

impl<D, A> GenericDataset for AugmentedDataset<D, A>
where
    D: FileDataset,
    A: Augmenter,
{
    fn input_channels(&self) -> usize {
        self.dataset.input_channels()
    }

    fn classes(&self) -> &IndexSet<String> {
        self.dataset.classes()
    }
}

impl<D, A> RandomAccessDataset for AugmentedDataset<D, A>
where
    D: FileDataset,
    A: Augmenter + 'static,
{
    fn num_records(&self) -> usize {
        self.dataset.records().len()
    }

    fn nth(&self, index: usize) -> Pin<Box<dyn Future<Output = Result<DataRecord>> + Send>> {
        let record = self.dataset.records().get(index).cloned();
        let augmenter = self.augmenter.clone();

        Box::pin(async move {
            let record = record.ok_or_else(|| format_err!("invalid index {}", index))?;

            let (image, bboxes) = tokio::task::spawn_blocking(move || -> Result<_> {
                let FileRecord {
                    ref path,
                    ref bboxes,
                    ..
                } = *record;

                let image = image::open(path)
                    .with_context(|| format!("failed to load image file '{}'", path.display()))?;
                augmenter.augment(image, bboxes.clone())
            })
            .await??;

            Ok(DataRecord { image, bboxes })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DatasetConfig,
        processor::{HorizontalFlip, Identity},
    };
    use bbox::{Rect, RectExt, XYXY};
    use std::fs;

    fn prepare_dataset(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("labelme-dl-augmented-tests")
            .join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        image::RgbImage::new(640, 480)
            .save(dir.join("0001.jpg"))
            .unwrap();
        fs::write(
            dir.join("0001.json"),
            r#"{
                "imageHeight": 480,
                "imageWidth": 640,
                "shapes": [
                    {"label": "Car", "points": [[10, 200], [300, 50]]}
                ]
            }"#,
        )
        .unwrap();

        dir
    }

    #[tokio::test]
    async fn augmented_dataset_identity() {
        let dir = prepare_dataset("identity");
        let dataset = LabelMeDataset::load(DatasetConfig::new(&dir)).await.unwrap();
        let dataset = AugmentedDataset::new(dataset, Identity);

        assert_eq!(dataset.num_records(), 1);

        let record = dataset.nth(0).await.unwrap();
        assert_eq!(record.image.width(), 640);
        assert_eq!(record.image.height(), 480);
        assert_eq!(
            record.bboxes[0].rect,
            XYXY::from_xyxy([r64(10.0), r64(50.0), r64(300.0), r64(200.0)])
        );
    }

    #[tokio::test]
    async fn augmented_dataset_flip_maps_boxes() {
        let dir = prepare_dataset("flip");
        let dataset = LabelMeDataset::load(DatasetConfig::new(&dir)).await.unwrap();
        let dataset = AugmentedDataset::new(dataset, HorizontalFlip);

        let record = dataset.nth(0).await.unwrap();
        let rect = &record.bboxes[0].rect;
        assert_eq!(rect.xmin(), 340.0);
        assert_eq!(rect.xmax(), 630.0);
        assert_eq!(rect.ymin(), 50.0);
        assert_eq!(rect.ymax(), 200.0);
    }

    #[tokio::test]
    async fn augmented_dataset_invalid_index() {
        let dir = prepare_dataset("invalid_index");
        let dataset = LabelMeDataset::load(DatasetConfig::new(&dir)).await.unwrap();
        let dataset = AugmentedDataset::new(dataset, Identity);

        assert!(dataset.nth(5).await.is_err());
    }
}
