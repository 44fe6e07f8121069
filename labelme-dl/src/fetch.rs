//! Locating and unpacking dataset archives.

use crate::common::*;
use std::{
    fs::{self, File},
    io::Read,
};

/// The capability to resolve a named archive to a local path, downloading it
/// only when absent from a local staging area. The dataset code consumes
/// this seam; how the bytes get there is the caller's concern.
pub trait ArchiveSource
where
    Self: Debug,
{
    fn fetch_or_download(&self, prefix: &str, suffix: &str, url: &str) -> Result<PathBuf>;
}

/// An archive source backed by a staging directory. Resolves archives
/// already present under the directory; a missing archive is an error that
/// names the URL to fetch, it is never downloaded here.
#[derive(Debug, Clone)]
pub struct StagingDir {
    dir: PathBuf,
}

impl StagingDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArchiveSource for StagingDir {
    fn fetch_or_download(&self, prefix: &str, suffix: &str, url: &str) -> Result<PathBuf> {
        let pattern = self.dir.join(format!("{}*{}", prefix, suffix));
        let pattern = pattern
            .to_str()
            .ok_or_else(|| format_err!("non-UTF-8 staging path '{}'", self.dir.display()))?;

        let candidates: Vec<PathBuf> = glob::glob(pattern)?.try_collect()?;
        candidates.into_iter().sorted().next_back().ok_or_else(|| {
            format_err!(
                "no archive matching '{}*{}' under '{}'; download it from '{}' first",
                prefix,
                suffix,
                self.dir.display(),
                url
            )
        })
    }
}

/// Extracts the annotation (`.json`) and image files from a dataset archive,
/// flattening their paths into `dest_dir`. Other archive members are
/// skipped. Returns the number of files written.
pub fn extract_dataset(
    archive: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    image_extension: &str,
) -> Result<usize> {
    let archive = archive.as_ref();
    let dest_dir = dest_dir.as_ref();

    let file = File::open(archive)
        .with_context(|| format!("failed to open archive '{}'", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("failed to read archive '{}'", archive.display()))?;

    fs::create_dir_all(dest_dir)?;

    let mut num_extracted = 0;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = match entry.enclosed_name() {
            Some(name) => name,
            None => continue,
        };
        let keep = matches!(
            name.extension().and_then(|ext| ext.to_str()),
            Some(ext) if ext == "json" || ext == image_extension
        );
        if !keep {
            continue;
        }

        let file_name = name
            .file_name()
            .ok_or_else(|| format_err!("invalid member name '{}' in archive", entry.name()))?
            .to_owned();

        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        fs::write(dest_dir.join(file_name), &content)?;
        num_extracted += 1;
    }

    info!(
        "extracted {} files from '{}' into '{}'",
        num_extracted,
        archive.display(),
        dest_dir.display()
    );

    Ok(num_extracted)
}
