//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the few PDF operations extraction
//! needs, isolating the concrete PDF library (lopdf) from the orchestration
//! in [`crate::convert`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::detect::sniff_path;
use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Filters that only compress bytes; the stream still holds raw pixels.
const PIXEL_FILTERS: &[&str] = &["FlateDecode", "Fl", "LZWDecode", "LZW"];

/// Resource dictionaries nest through Form XObjects and page-tree parents.
const MAX_DEPTH: usize = 32;

/// An image XObject as it is stored in the document.
#[derive(Debug, Clone, Default)]
pub struct RawImage {
    /// Object the image was read from
    pub id: PageId,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bits_per_component: Option<u8>,
    /// Colour components per pixel, when the colour space is understood
    pub components: Option<u8>,
    /// Stream filter chain, outermost first
    pub filters: Vec<String>,
    /// Stream bytes as stored in the file
    pub raw: Vec<u8>,
    /// Stream bytes with compression filters removed, for pixel data only
    pub decoded: Option<Vec<u8>>,
}

impl RawImage {
    /// True when every filter merely compresses pixel data.
    pub fn holds_pixels(&self) -> bool {
        self.filters
            .iter()
            .all(|f| PIXEL_FILTERS.contains(&f.as_str()))
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), page numbers 1-indexed.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Extract the plain text of a page.
    fn page_text(&self, page_number: u32) -> Result<String>;

    /// List the images a page references, each object once, in resource order.
    fn page_images(&self, page: PageId) -> Result<Vec<RawImage>>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    ///
    /// Every failure is reported as [`Error::DocumentOpen`].
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_path(path).map_err(|e| Error::document_open(path, e))?;

        let doc = LopdfDocument::load(path)
            .map_err(|e| Error::document_open(path, Error::from(e)))?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Ok(Self { doc })
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// The page's resource dictionary, inherited from the page tree if needed.
    fn page_resources(&self, page: PageId) -> Option<&Dictionary> {
        let mut node = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                return self.resolve_dict(resources);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn collect_images(
        &self,
        resources: &Dictionary,
        depth: usize,
        visited_forms: &mut HashSet<ObjectId>,
        images: &mut Vec<RawImage>,
    ) {
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        else {
            return;
        };

        for (name, obj) in xobjects.iter() {
            let Ok(id) = obj.as_reference() else {
                continue;
            };
            let Ok(stream) = self.doc.get_object(id).and_then(Object::as_stream) else {
                log::debug!(
                    "XObject /{} ({:?}) is not a stream",
                    String::from_utf8_lossy(name),
                    id
                );
                continue;
            };

            match stream.dict.get(b"Subtype").and_then(Object::as_name_str) {
                Ok("Image") => {
                    if images.iter().all(|img| img.id != id) {
                        images.push(self.read_image(id, stream));
                    }
                }
                Ok("Form") if depth < MAX_DEPTH && visited_forms.insert(id) => {
                    if let Some(form_resources) = stream
                        .dict
                        .get(b"Resources")
                        .ok()
                        .and_then(|o| self.resolve_dict(o))
                    {
                        self.collect_images(form_resources, depth + 1, visited_forms, images);
                    }
                }
                _ => {}
            }
        }
    }

    fn read_image(&self, id: ObjectId, stream: &Stream) -> RawImage {
        let dict = &stream.dict;

        let filters: Vec<String> = match dict.get(b"Filter") {
            Ok(Object::Name(n)) => vec![String::from_utf8_lossy(n).into_owned()],
            Ok(Object::Array(arr)) => arr
                .iter()
                .filter_map(|f| f.as_name_str().ok())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };

        let mut image = RawImage {
            id,
            width: dict_u32(dict, b"Width"),
            height: dict_u32(dict, b"Height"),
            bits_per_component: dict
                .get(b"BitsPerComponent")
                .ok()
                .and_then(|b| b.as_i64().ok())
                .and_then(|b| u8::try_from(b).ok()),
            components: self.color_components(dict),
            filters,
            raw: stream.content.clone(),
            decoded: None,
        };

        if image.holds_pixels() {
            image.decoded = if image.filters.is_empty() {
                Some(stream.content.clone())
            } else {
                match stream.decompressed_content() {
                    Ok(data) => Some(data),
                    Err(e) => {
                        log::warn!("Could not decompress image {:?}: {}", id, e);
                        None
                    }
                }
            };
        }

        image
    }

    fn color_components(&self, dict: &Dictionary) -> Option<u8> {
        let mut space = dict.get(b"ColorSpace").ok()?;
        if let Object::Reference(r) = space {
            space = self.doc.get_object(*r).ok()?;
        }

        match space {
            Object::Name(name) => components_for_name(name),
            Object::Array(arr) => match arr.first()?.as_name_str().ok()? {
                "ICCBased" => {
                    let profile = self
                        .doc
                        .get_object(arr.get(1)?.as_reference().ok()?)
                        .and_then(Object::as_stream)
                        .ok()?;
                    let n = profile.dict.get(b"N").ok()?.as_i64().ok()?;
                    u8::try_from(n).ok()
                }
                "CalGray" => Some(1),
                "CalRGB" => Some(3),
                _ => None,
            },
            _ => None,
        }
    }
}

fn dict_u32(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    dict.get(key)
        .ok()
        .and_then(|v| v.as_i64().ok())
        .and_then(|v| u32::try_from(v).ok())
}

fn components_for_name(name: &[u8]) -> Option<u8> {
    match name {
        b"DeviceGray" | b"G" | b"CalGray" => Some(1),
        b"DeviceRGB" | b"RGB" | b"CalRGB" => Some(3),
        b"DeviceCMYK" | b"CMYK" => Some(4),
        _ => None,
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }

    fn page_images(&self, page: PageId) -> Result<Vec<RawImage>> {
        self.doc
            .get_dictionary(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut images = Vec::new();
        if let Some(resources) = self.page_resources(page) {
            let mut visited_forms = HashSet::new();
            self.collect_images(resources, 0, &mut visited_forms, &mut images);
        }
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_for_name() {
        assert_eq!(components_for_name(b"DeviceGray"), Some(1));
        assert_eq!(components_for_name(b"DeviceRGB"), Some(3));
        assert_eq!(components_for_name(b"DeviceCMYK"), Some(4));
        assert_eq!(components_for_name(b"Indexed"), None);
    }

    #[test]
    fn test_holds_pixels() {
        let mut image = RawImage::default();
        assert!(image.holds_pixels());

        image.filters = vec!["FlateDecode".into()];
        assert!(image.holds_pixels());

        image.filters = vec!["DCTDecode".into()];
        assert!(!image.holds_pixels());
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        assert!(LopdfBackend::load_bytes(b"definitely not a pdf").is_err());
    }

    #[test]
    fn test_load_file_reports_document_open() {
        let result = LopdfBackend::load_file("/no/such/file.pdf");
        assert!(matches!(result, Err(Error::DocumentOpen { .. })));
    }
}
