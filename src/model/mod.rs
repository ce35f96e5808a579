//! Extraction model types.
//!
//! A [`Manifest`] is the in-memory result of one run: one [`PageRecord`] per
//! page, each holding the page text and the [`ImageRef`]s written for it.

mod image;
mod manifest;

pub use image::{ImageFormat, ImageRef, NativeImage};
pub use manifest::{page_key, Manifest, PageRecord};
