//! Error types for pdfharvest.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pdfharvest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when clearing the image directory or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Processing was requested without a usable input path.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The input file could not be opened as a PDF document.
    #[error("Cannot open PDF '{}': {reason}", path.display())]
    DocumentOpen {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Extraction finished but found no text and no images on any page.
    #[error("No text or images could be extracted from the PDF")]
    EmptyResult,

    /// Copying an extracted image to a user-chosen destination failed.
    #[error("Could not save image to '{}': {source}", path.display())]
    ImageSave {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Error while rendering the JSON report.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Wrap any failure that happens while opening `path` as [`Error::DocumentOpen`].
    pub fn document_open(path: &Path, reason: impl Display) -> Self {
        Error::DocumentOpen {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error was raised before any document was read.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
