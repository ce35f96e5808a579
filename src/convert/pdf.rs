//! PDF extractor implementation.

use std::path::Path;

use crate::error::Result;
use crate::model::{Manifest, PageRecord};
use crate::parser::{to_native, ErrorMode, ExtractOptions, LopdfBackend, PdfBackend};
use crate::store::ImageStore;

use super::DocumentExtractor;

/// Extracts page text and images from PDF files with lopdf.
///
/// Images are written to the configured output directory, which is cleared
/// once the document has been opened successfully.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    options: ExtractOptions,
}

impl PdfExtractor {
    /// Create a PDF extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    fn store(&self) -> ImageStore {
        ImageStore::new(&self.options.output_dir, self.options.naming)
    }

    /// Walk every page of `backend`, saving images into `store`.
    ///
    /// The store is expected to be cleared already.
    pub fn extract_from<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        store: &ImageStore,
    ) -> Result<Manifest> {
        let mut manifest = Manifest::new();

        for (page_number, page_id) in backend.pages() {
            let text = match backend.page_text(page_number) {
                Ok(text) => text.trim().to_string(),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping text of page {}: {}", page_number, e);
                    String::new()
                }
                Err(e) => return Err(e),
            };

            let images = match backend.page_images(page_id) {
                Ok(images) => images,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping images of page {}: {}", page_number, e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            let mut record = PageRecord::new(page_number, text);
            for (index, raw) in (1u32..).zip(images.iter()) {
                let saved = store.save(page_number, index, &to_native(raw))?;
                record.images.push(saved);
            }

            log::debug!(
                "Page {}: {} chars, {} image(s)",
                page_number,
                record.text.len(),
                record.images.len()
            );
            manifest.push(record);
        }

        Ok(manifest)
    }
}

impl DocumentExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, path: &Path) -> Result<Manifest> {
        let store = self.store();
        store.ensure_dir()?;

        let backend = LopdfBackend::load_file(path)?;
        log::info!("Opened {} (PDF {})", path.display(), backend.version());

        let removed = store.clear()?;
        if removed > 0 {
            log::info!(
                "Removed {} image(s) left over in {}",
                removed,
                store.dir().display()
            );
        }

        self.extract_from(&backend, &store)
    }
}
