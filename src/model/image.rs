//! Extracted image types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Encoding of the bytes written for an extracted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Baseline or progressive JPEG (`DCTDecode`)
    Jpeg,
    /// JPEG 2000 codestream (`JPXDecode`)
    Jpeg2000,
    /// PNG produced from raw pixel data
    Png,
    /// JBIG2 bi-level stream (`JBIG2Decode`)
    Jbig2,
    /// CCITT Group 3/4 fax stream (`CCITTFaxDecode`)
    Ccitt,
    /// Stream bytes in a form no viewer will recognize
    Raw,
}

impl ImageFormat {
    /// MIME type of the written bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Jpeg2000 => "image/jp2",
            ImageFormat::Png => "image/png",
            ImageFormat::Jbig2 => "image/x-jbig2",
            ImageFormat::Ccitt => "image/x-ccitt",
            ImageFormat::Raw => "application/octet-stream",
        }
    }

    /// File extension matching the real encoding.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Jpeg2000 => "jp2",
            ImageFormat::Png => "png",
            ImageFormat::Jbig2 => "jbig2",
            ImageFormat::Ccitt => "ccitt",
            ImageFormat::Raw => "bin",
        }
    }

    /// Guess the format from leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if data.starts_with(&[0x00, 0x00, 0x00, 0x0C, b'j', b'P', b' ', b' '])
            || data.starts_with(&[0xFF, 0x4F, 0xFF, 0x51])
        {
            Some(ImageFormat::Jpeg2000)
        } else {
            None
        }
    }
}

/// Bytes ready to be written for one image, with their encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A persisted image extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Owning page (1-indexed)
    pub page: u32,

    /// Position within the page (1-indexed, resets per page)
    pub index: u32,

    /// Where the image was written
    pub path: PathBuf,

    /// Encoding of the written bytes
    pub format: ImageFormat,

    /// Width in pixels, when declared by the image dictionary
    pub width: Option<u32>,

    /// Height in pixels, when declared by the image dictionary
    pub height: Option<u32>,
}

impl ImageRef {
    /// Reference a PNG at `path` with no declared dimensions.
    pub fn new(page: u32, index: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            page,
            index,
            path: path.into(),
            format: ImageFormat::Png,
            width: None,
            height: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as it appears in the report, e.g. `images/page_1_img_1.png`.
    pub fn report_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// File name component of the path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.report_path())
    }
}
