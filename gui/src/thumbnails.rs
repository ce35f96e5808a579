//! Thumbnail strip built from a manifest.

use std::path::Path;

use eframe::egui;
use image::imageops::FilterType;
use image::ImageReader;
use pdfharvest::{ImageRef, Manifest};

/// Thumbnails fit inside a square of this many pixels.
pub const THUMBNAIL_SIZE: u32 = 100;

/// Scale `(width, height)` to fit a `max`×`max` box, keeping the aspect
/// ratio. Images that already fit are left as they are.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width.max(1), height.max(1));
    }
    let scale = f64::from(max) / f64::from(width.max(height));
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

/// Decode an image file of any supported format into thumbnail pixels.
///
/// The content is sniffed, so a JPEG stored under a `.png` name still loads.
pub fn load_pixels(path: &Path) -> image::ImageResult<image::RgbaImage> {
    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let (width, height) = fit_within(decoded.width(), decoded.height(), THUMBNAIL_SIZE);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };
    Ok(resized.to_rgba8())
}

/// One entry in the strip. `texture` is `None` when the file could not be
/// decoded; the entry still offers its Save button.
pub struct Thumbnail {
    pub image: ImageRef,
    pub texture: Option<egui::TextureHandle>,
}

impl Thumbnail {
    /// Display size of the texture, or the placeholder box.
    pub fn size(&self) -> egui::Vec2 {
        match &self.texture {
            Some(texture) => texture.size_vec2(),
            None => egui::Vec2::splat(THUMBNAIL_SIZE as f32),
        }
    }
}

/// Load a texture for every image in `manifest`, in page order.
pub fn build_strip(ctx: &egui::Context, manifest: &Manifest) -> Vec<Thumbnail> {
    manifest
        .images()
        .map(|image| {
            let texture = match load_pixels(image.path()) {
                Ok(pixels) => {
                    let size = [pixels.width() as usize, pixels.height() as usize];
                    let color = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
                    Some(ctx.load_texture(image.file_name(), color, Default::default()))
                }
                Err(e) => {
                    log::warn!("No preview for {}: {}", image.path().display(), e);
                    None
                }
            };
            Thumbnail {
                image: image.clone(),
                texture,
            }
        })
        .collect()
}
