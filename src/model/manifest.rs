//! Per-page extraction results.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::ImageRef;

/// Report key for a 1-indexed page, e.g. `page_3`.
pub fn page_key(page: u32) -> String {
    format!("page_{}", page)
}

/// Text and images belonging to a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted plain text, trimmed
    pub text: String,

    /// Images in extraction order
    pub images: Vec<ImageRef>,
}

impl PageRecord {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            images: Vec::new(),
        }
    }

    pub fn key(&self) -> String {
        page_key(self.number)
    }

    /// True when the page produced neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty()
    }
}

/// Everything one extraction run produced, in page order.
///
/// Serializes as `{"text": {"page_1": ...}, "images": {"page_1": [...]}}` with
/// keys in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pages: Vec<PageRecord>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Get a page by number (1-indexed).
    pub fn page(&self, number: u32) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.number == number)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All images across pages, page by page.
    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.pages.iter().flat_map(|p| p.images.iter())
    }

    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }

    /// True when no page yielded text or images (including zero-page documents).
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(PageRecord::is_empty)
    }
}

impl FromIterator<PageRecord> for Manifest {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("Manifest", 2)?;
        report.serialize_field("text", &TextSection(&self.pages))?;
        report.serialize_field("images", &ImageSection(&self.pages))?;
        report.end()
    }
}

struct TextSection<'a>(&'a [PageRecord]);

impl Serialize for TextSection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for page in self.0 {
            map.serialize_entry(&page.key(), &page.text)?;
        }
        map.end()
    }
}

struct ImageSection<'a>(&'a [PageRecord]);

impl Serialize for ImageSection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for page in self.0 {
            let paths: Vec<String> = page.images.iter().map(ImageRef::report_path).collect();
            map.serialize_entry(&page.key(), &paths)?;
        }
        map.end()
    }
}
