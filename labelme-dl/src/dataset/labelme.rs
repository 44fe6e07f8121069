use super::*;
use crate::{
    annotation::{parse_annotation_file, ParsedAnnotation},
    common::*,
    config::DatasetConfig,
};
use bbox::HW;
use label::Label;

/// The dataset of labelme-style annotation files paired with images.
///
/// Image and annotation files pair up by sorted file name; a count or stem
/// mismatch fails the load rather than guessing a pairing.
#[derive(Debug, Clone)]
pub struct LabelMeDataset {
    pub config: DatasetConfig,
    pub classes: IndexSet<String>,
    pub records: Vec<Arc<FileRecord>>,
}

impl GenericDataset for LabelMeDataset {
    fn input_channels(&self) -> usize {
        self.config.input_channels
    }

    fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }
}

impl FileDataset for LabelMeDataset {
    fn records(&self) -> &[Arc<FileRecord>] {
        &self.records
    }
}

impl LabelMeDataset {
    pub async fn load(config: DatasetConfig) -> Result<Self> {
        let (classes, records) = {
            let config = config.clone();
            tokio::task::spawn_blocking(move || load_labelme_dataset(&config)).await??
        };

        Ok(Self {
            config,
            classes,
            records,
        })
    }
}

fn load_labelme_dataset(
    config: &DatasetConfig,
) -> Result<(IndexSet<String>, Vec<Arc<FileRecord>>)> {
    let DatasetConfig {
        ref dataset_dir,
        ref image_extension,
        ref exclude_token,
        count_classes_from_zero,
        ref class_whitelist,
        ..
    } = *config;

    // match image and annotation files pairwise by sorted file name
    let image_files = sorted_glob(dataset_dir, &format!("*.{}", image_extension))?;
    let annotation_files = sorted_glob(dataset_dir, "*.json")?;

    ensure!(
        image_files.len() == annotation_files.len(),
        "found {} image files but {} annotation files in '{}'",
        image_files.len(),
        annotation_files.len(),
        dataset_dir.display()
    );

    // parse annotations
    let mut samples: Vec<(PathBuf, ParsedAnnotation)> = Vec::with_capacity(image_files.len());
    let mut num_excluded = 0;

    for (image_file, annotation_file) in izip!(&image_files, &annotation_files) {
        ensure!(
            image_file.file_stem() == annotation_file.file_stem(),
            "image file '{}' and annotation file '{}' do not pair up",
            image_file.display(),
            annotation_file.display()
        );

        let annotation = parse_annotation_file(annotation_file, exclude_token)?;

        // cross-check the declared size against the actual image header
        let imagesize::ImageSize { height, width } = imagesize::size(image_file)
            .with_context(|| format!("failed to read image file '{}'", image_file.display()))?;
        ensure!(
            annotation.size == HW::from_hw([height, width]),
            "annotation '{}' declares image size {}x{} but '{}' is {}x{}",
            annotation_file.display(),
            annotation.size.w(),
            annotation.size.h(),
            image_file.display(),
            width,
            height
        );

        num_excluded += annotation.num_excluded;
        samples.push((image_file.clone(), annotation));
    }

    if num_excluded > 0 {
        warn!(
            "excluded {} shapes by class token '{}' in '{}'",
            num_excluded,
            exclude_token,
            dataset_dir.display()
        );
    }

    let keep = |label: &str| match class_whitelist {
        Some(whitelist) => whitelist.contains(label),
        None => true,
    };

    // collect class names in first-seen order
    let classes: IndexSet<String> = samples
        .iter()
        .flat_map(|(_, annotation)| annotation.labels.iter())
        .filter(|label| keep(label))
        .cloned()
        .collect();

    let class_offset = if count_classes_from_zero { 0 } else { 1 };

    let records: Vec<_> = samples
        .into_iter()
        .map(|(image_file, annotation)| {
            let ParsedAnnotation {
                size, labels, boxes, ..
            } = annotation;

            let bboxes: Vec<_> = izip!(labels, boxes)
                .filter_map(|(label, rect)| {
                    let class_index = classes.get_index_of(label.as_str())?;
                    Some(Label {
                        rect,
                        class: class_index + class_offset,
                    })
                })
                .collect();

            Arc::new(FileRecord {
                path: image_file,
                size,
                bboxes,
            })
        })
        .collect();

    info!(
        "loaded {} records with {} classes from '{}'",
        records.len(),
        classes.len(),
        dataset_dir.display()
    );

    Ok((classes, records))
}

fn sorted_glob(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern = pattern
        .to_str()
        .ok_or_else(|| format_err!("non-UTF-8 dataset path '{}'", dir.display()))?;
    let files: Vec<PathBuf> = glob::glob(pattern)?.try_collect()?;
    Ok(files.into_iter().sorted().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::{Rect, RectExt, XYXY};
    use std::fs;

    fn prepare_dataset(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("labelme-dl-dataset-tests").join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        image::RgbImage::new(640, 480)
            .save(dir.join("0001.jpg"))
            .unwrap();
        image::RgbImage::new(640, 480)
            .save(dir.join("0002.jpg"))
            .unwrap();

        fs::write(
            dir.join("0001.json"),
            r#"{
                "imageHeight": 480,
                "imageWidth": 640,
                "shapes": [
                    {"label": "Car", "points": [[10, 200], [300, 50]]},
                    {"label": "Anomalia_x", "points": [[0, 10], [10, 0]]}
                ]
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join("0002.json"),
            r#"{
                "imageHeight": 480,
                "imageWidth": 640,
                "shapes": [
                    {"label": "Pedestrian", "points": [[0, 20], [15, 5]]},
                    {"label": "Car", "points": [[100, 150], [200, 120]]}
                ]
            }"#,
        )
        .unwrap();

        dir
    }

    #[tokio::test]
    async fn labelme_dataset_load() {
        let dir = prepare_dataset("load");
        let dataset = LabelMeDataset::load(DatasetConfig::new(&dir)).await.unwrap();

        assert_eq!(dataset.input_channels(), 3);
        assert_eq!(
            dataset.classes().iter().collect::<Vec<_>>(),
            vec!["Car", "Pedestrian"]
        );

        let records = dataset.records();
        assert_eq!(records.len(), 2);

        // classes count from 1 by default
        let first = &records[0];
        assert_eq!(first.size, HW::from_hw([480, 640]));
        assert_eq!(first.bboxes.len(), 1);
        assert_eq!(first.bboxes[0].class, 1);
        assert_eq!(
            first.bboxes[0].rect,
            XYXY::from_xyxy([r64(10.0), r64(50.0), r64(300.0), r64(200.0)])
        );

        let second = &records[1];
        assert_eq!(second.bboxes.len(), 2);
        assert_eq!(second.bboxes[0].class, 2);
        assert_eq!(second.bboxes[1].class, 1);
    }

    #[tokio::test]
    async fn labelme_dataset_count_from_zero() {
        let dir = prepare_dataset("from_zero");
        let config = DatasetConfig {
            count_classes_from_zero: true,
            ..DatasetConfig::new(&dir)
        };
        let dataset = LabelMeDataset::load(config).await.unwrap();

        assert_eq!(dataset.records()[0].bboxes[0].class, 0);
        assert_eq!(dataset.records()[1].bboxes[0].class, 1);
    }

    #[tokio::test]
    async fn labelme_dataset_whitelist() {
        let dir = prepare_dataset("whitelist");
        let config = DatasetConfig {
            class_whitelist: Some(["Car".to_owned()].into_iter().collect()),
            ..DatasetConfig::new(&dir)
        };
        let dataset = LabelMeDataset::load(config).await.unwrap();

        assert_eq!(dataset.classes().iter().collect::<Vec<_>>(), vec!["Car"]);
        assert_eq!(dataset.records()[1].bboxes.len(), 1);
        assert_eq!(dataset.records()[1].bboxes[0].rect.xmin(), 100.0);
    }

    #[tokio::test]
    async fn labelme_dataset_count_mismatch_fails() {
        let dir = prepare_dataset("count_mismatch");
        fs::remove_file(dir.join("0002.json")).unwrap();

        let result = LabelMeDataset::load(DatasetConfig::new(&dir)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn labelme_dataset_stem_mismatch_fails() {
        let dir = prepare_dataset("stem_mismatch");
        fs::rename(dir.join("0002.json"), dir.join("0003.json")).unwrap();

        let result = LabelMeDataset::load(DatasetConfig::new(&dir)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn labelme_dataset_size_mismatch_fails() {
        let dir = prepare_dataset("size_mismatch");
        image::RgbImage::new(320, 240)
            .save(dir.join("0001.jpg"))
            .unwrap();

        let result = LabelMeDataset::load(DatasetConfig::new(&dir)).await;
        assert!(result.is_err());
    }
}
