//! Extraction options and configuration.

use std::path::{Path, PathBuf};

use crate::model::ImageFormat;

/// Directory that receives extracted images when none is configured.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Options for extracting a PDF document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory that is cleared and refilled with extracted images
    pub output_dir: PathBuf,

    /// How image files are named
    pub naming: ImageNaming,

    /// Error handling mode for per-page failures
    pub error_mode: ErrorMode,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the image naming policy.
    pub fn with_naming(mut self, naming: ImageNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Keep going when a page's text or images cannot be read.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Abort the run on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            naming: ImageNaming::Legacy,
            error_mode: ErrorMode::Lenient,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip unreadable page content and continue
    #[default]
    Lenient,
}

/// File naming policy for extracted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageNaming {
    /// `page_<N>_img_<M>.png` whatever the real encoding is
    #[default]
    Legacy,
    /// `page_<N>_img_<M>.<ext>` with the extension of the real encoding
    ByFormat,
}

impl ImageNaming {
    /// File name for image `index` of page `page`.
    pub fn file_name(&self, page: u32, index: u32, format: ImageFormat) -> String {
        let extension = match self {
            ImageNaming::Legacy => "png",
            ImageNaming::ByFormat => format.extension(),
        };
        format!("page_{}_img_{}.{}", page, index, extension)
    }
}
