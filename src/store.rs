//! Flat on-disk directory of extracted images.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{ImageRef, NativeImage};
use crate::parser::ImageNaming;

/// The directory images are written to during a run.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    naming: ImageNaming,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, naming: ImageNaming) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Remove every regular file directly inside the directory.
    ///
    /// Subdirectories and their contents are left alone. The directory is
    /// created if missing. Returns the number of files removed; the first
    /// failed removal aborts the call.
    pub fn clear(&self) -> Result<usize> {
        self.ensure_dir()?;

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        log::debug!("Cleared {} file(s) from {}", removed, self.dir.display());
        Ok(removed)
    }

    /// Write image `index` of page `page` and return its reference.
    pub fn save(&self, page: u32, index: u32, image: &NativeImage) -> Result<ImageRef> {
        let path = self
            .dir
            .join(self.naming.file_name(page, index, image.format));
        fs::write(&path, &image.data)?;

        log::debug!(
            "Wrote {} ({} bytes, {})",
            path.display(),
            image.data.len(),
            image.format.mime_type()
        );

        Ok(ImageRef {
            page,
            index,
            path,
            format: image.format,
            width: image.width,
            height: image.height,
        })
    }
}

/// Copy an extracted image byte-for-byte to a user-chosen destination.
pub fn export_image(source: &Path, destination: &Path) -> Result<u64> {
    fs::copy(source, destination).map_err(|err| Error::ImageSave {
        path: destination.to_path_buf(),
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageFormat;
    use tempfile::tempdir;

    fn jpeg() -> NativeImage {
        NativeImage {
            format: ImageFormat::Jpeg,
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: Some(1),
            height: Some(1),
        }
    }

    #[test]
    fn test_clear_creates_missing_dir() {
        let tmp = tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("images"), ImageNaming::Legacy);

        assert_eq!(store.clear().unwrap(), 0);
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_clear_keeps_subdirectories() {
        let tmp = tempdir().unwrap();
        let store = ImageStore::new(tmp.path(), ImageNaming::Legacy);
        fs::write(tmp.path().join("old_1.png"), b"a").unwrap();
        fs::write(tmp.path().join("old_2.png"), b"b").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("keep.png"), b"c").unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(!tmp.path().join("old_1.png").exists());
        assert!(tmp.path().join("nested").join("keep.png").exists());
    }

    #[test]
    fn test_save_legacy_name() {
        let tmp = tempdir().unwrap();
        let store = ImageStore::new(tmp.path(), ImageNaming::Legacy);

        let image = store.save(3, 2, &jpeg()).unwrap();
        assert_eq!(image.file_name(), "page_3_img_2.png");
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(fs::read(image.path()).unwrap(), jpeg().data);
    }

    #[test]
    fn test_save_by_format_name() {
        let tmp = tempdir().unwrap();
        let store = ImageStore::new(tmp.path(), ImageNaming::ByFormat);

        let image = store.save(1, 1, &jpeg()).unwrap();
        assert_eq!(image.file_name(), "page_1_img_1.jpg");
    }

    #[test]
    fn test_export_is_byte_identical() {
        let tmp = tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("images"), ImageNaming::Legacy);
        store.ensure_dir().unwrap();
        let image = store.save(1, 1, &jpeg()).unwrap();

        let dest = tmp.path().join("copy.png");
        export_image(image.path(), &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), fs::read(image.path()).unwrap());
    }

    #[test]
    fn test_export_failure_is_image_save() {
        let tmp = tempdir().unwrap();
        let missing_parent = tmp.path().join("missing").join("copy.png");
        fs::write(tmp.path().join("src.png"), b"x").unwrap();

        let err = export_image(&tmp.path().join("src.png"), &missing_parent).unwrap_err();
        assert!(matches!(err, Error::ImageSave { .. }));
    }
}
