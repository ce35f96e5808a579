//! Extraction pipeline: validate input, extract, write the report.
//!
//! The extraction step sits behind [`DocumentExtractor`] so callers (the
//! desktop shell, tests) never depend on the PDF library directly.
//!
//! # Example
//!
//! ```no_run
//! use pdfharvest::convert::{Pipeline, PdfExtractor};
//! use std::path::Path;
//!
//! fn main() -> pdfharvest::Result<()> {
//!     let pipeline = Pipeline::new(Box::new(PdfExtractor::new()));
//!     let manifest = pipeline.run(Path::new("document.pdf"))?;
//!     println!("{} pages, {} images", manifest.page_count(), manifest.image_count());
//!     Ok(())
//! }
//! ```

mod pdf;

pub use pdf::PdfExtractor;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Manifest;
use crate::render::{write_report, DEFAULT_REPORT_PATH};

/// Something that turns a document path into a [`Manifest`].
pub trait DocumentExtractor: Send {
    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract text and images from the document at `path`.
    fn extract(&self, path: &Path) -> Result<Manifest>;
}

/// Options for the pipeline around an extractor.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Where the JSON report is written
    pub report_path: PathBuf,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report path.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

const NO_INPUT: &str = "Please select a PDF file";

/// Turn a raw path field into a path, rejecting blank input.
pub fn validate_input(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(NO_INPUT.into()));
    }
    Ok(PathBuf::from(trimmed))
}

/// Empty or whitespace-only paths never name a document.
fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// One extraction run from input path to report file.
pub struct Pipeline {
    extractor: Box<dyn DocumentExtractor>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline writing the report to the default path.
    pub fn new(extractor: Box<dyn DocumentExtractor>) -> Self {
        Self::with_options(extractor, PipelineOptions::default())
    }

    pub fn with_options(extractor: Box<dyn DocumentExtractor>, options: PipelineOptions) -> Self {
        Self { extractor, options }
    }

    pub fn report_path(&self) -> &Path {
        &self.options.report_path
    }

    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    /// Extract `input` and write its report.
    ///
    /// A blank path fails with [`Error::Validation`] before anything is
    /// touched. A document with no text and no images on any page fails with
    /// [`Error::EmptyResult`] and no report is written.
    pub fn run(&self, input: &Path) -> Result<Manifest> {
        if is_blank(input) {
            return Err(Error::Validation(NO_INPUT.into()));
        }

        log::info!(
            "Extracting {} with the {} extractor",
            input.display(),
            self.extractor.name()
        );
        let manifest = self.extractor.extract(input)?;

        if manifest.is_empty() {
            log::warn!("Nothing extracted from {}", input.display());
            return Err(Error::EmptyResult);
        }

        write_report(&manifest, &self.options.report_path)?;
        log::info!(
            "Extracted {} page(s) and {} image(s)",
            manifest.page_count(),
            manifest.image_count()
        );
        Ok(manifest)
    }
}
