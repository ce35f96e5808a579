//! # pdfharvest
//!
//! Extract page text and embedded images from PDF files.
//!
//! Each run clears an image directory, writes every image a page references
//! as `page_<N>_img_<M>.png`, and records the page texts and image paths in a
//! JSON report:
//!
//! ```text
//! { "text":   { "page_1": "...", "page_2": "" },
//!   "images": { "page_1": ["images/page_1_img_1.png"], "page_2": [] } }
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfharvest::Harvest;
//!
//! fn main() -> pdfharvest::Result<()> {
//!     let manifest = Harvest::new()
//!         .with_output_dir("images")
//!         .with_report_path("output.json")
//!         .run("document.pdf")?;
//!
//!     for image in manifest.images() {
//!         println!("page {}: {}", image.page, image.report_path());
//!     }
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use convert::{validate_input, DocumentExtractor, PdfExtractor, Pipeline, PipelineOptions};
pub use error::{Error, Result};
pub use model::{page_key, ImageFormat, ImageRef, Manifest, PageRecord};
pub use parser::{ErrorMode, ExtractOptions, ImageNaming, DEFAULT_IMAGE_DIR};
pub use render::{load_report, to_json, write_report, JsonFormat, DEFAULT_REPORT_PATH};
pub use store::{export_image, ImageStore};

use std::path::Path;

/// Extract a PDF into the default `images/` directory without writing a report.
///
/// # Example
///
/// ```no_run
/// let manifest = pdfharvest::extract_file("document.pdf").unwrap();
/// println!("Pages: {}", manifest.page_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    PdfExtractor::new().extract(path.as_ref())
}

/// Extract a PDF and write `output.json`, using the default locations.
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    Harvest::new().run(path)
}

/// Builder for a complete extraction run.
///
/// # Example
///
/// ```no_run
/// use pdfharvest::{Harvest, ImageNaming};
///
/// let manifest = Harvest::new()
///     .with_naming(ImageNaming::ByFormat)
///     .strict()
///     .run("document.pdf")?;
/// # Ok::<(), pdfharvest::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    extract_options: ExtractOptions,
    pipeline_options: PipelineOptions,
}

impl Harvest {
    /// Create a new builder with default locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image output directory.
    pub fn with_output_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.extract_options = self.extract_options.with_output_dir(dir);
        self
    }

    /// Set the report path.
    pub fn with_report_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.pipeline_options = self.pipeline_options.with_report_path(path);
        self
    }

    /// Set the image naming policy.
    pub fn with_naming(mut self, naming: ImageNaming) -> Self {
        self.extract_options = self.extract_options.with_naming(naming);
        self
    }

    /// Abort on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Build the pipeline this builder describes.
    pub fn pipeline(self) -> Pipeline {
        Pipeline::with_options(
            Box::new(PdfExtractor::with_options(self.extract_options)),
            self.pipeline_options,
        )
    }

    /// Extract `path` and write the report.
    pub fn run<P: AsRef<Path>>(self, path: P) -> Result<Manifest> {
        self.pipeline().run(path.as_ref())
    }
}
