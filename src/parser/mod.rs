//! PDF access: document loading, page text and image XObjects.

mod backend;
mod images;
mod options;

pub use backend::{LopdfBackend, PageId, PdfBackend, RawImage};
pub use images::to_native;
pub use options::{ErrorMode, ExtractOptions, ImageNaming, DEFAULT_IMAGE_DIR};
