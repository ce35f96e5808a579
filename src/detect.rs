//! Header sniffing for PDF input files.
//!
//! Readers tolerate a few bytes of junk before the `%PDF-` marker, so the
//! marker is searched for in the first kilobyte rather than only at offset 0.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_WINDOW: usize = 1024;

/// Version declared in a PDF header, e.g. `1.7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfVersion {
    pub major: u8,
    pub minor: u8,
}

impl std::fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Read the start of `path` and check that it carries a PDF header.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfVersion> {
    let mut head = Vec::with_capacity(HEADER_WINDOW);
    File::open(path)?
        .take(HEADER_WINDOW as u64)
        .read_to_end(&mut head)?;
    sniff_bytes(&head)
}

/// Check that `data` carries a PDF header within its first kilobyte.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfVersion> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    match window.get(start + PDF_MAGIC.len()..start + PDF_MAGIC.len() + 3) {
        Some([major, b'.', minor]) if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfVersion {
                major: major - b'0',
                minor: minor - b'0',
            })
        }
        _ => Err(Error::UnknownFormat),
    }
}
