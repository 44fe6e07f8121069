//! Dataset loading options.

use crate::{annotation::DEFAULT_EXCLUDE_TOKEN, common::*};

/// Options for loading a labelme-style dataset directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The directory containing paired image and annotation files.
    pub dataset_dir: PathBuf,
    /// File extension of the image files, without the leading dot.
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
    /// Shapes whose label contains this token are skipped entirely.
    #[serde(default = "default_exclude_token")]
    pub exclude_token: String,
    /// Whether object classes are numbered from 0 instead of 1.
    #[serde(default)]
    pub count_classes_from_zero: bool,
    /// The number of color channels of the dataset images.
    #[serde(default = "default_input_channels")]
    pub input_channels: usize,
    /// Optional list of whitelisted classes.
    #[serde(default)]
    pub class_whitelist: Option<HashSet<String>>,
}

impl DatasetConfig {
    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_dir: dataset_dir.into(),
            image_extension: default_image_extension(),
            exclude_token: default_exclude_token(),
            count_classes_from_zero: false,
            input_channels: default_input_channels(),
            class_whitelist: None,
        }
    }

    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

fn default_image_extension() -> String {
    "jpg".into()
}

fn default_exclude_token() -> String {
    DEFAULT_EXCLUDE_TOKEN.into()
}

fn default_input_channels() -> usize {
    3
}
