//! Turning image XObjects into writable files.
//!
//! Streams compressed with a self-contained codec are written as stored.
//! Raw pixel data is wrapped in a PNG so that ordinary viewers can open it.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat as CodecFormat, RgbImage};

use super::backend::RawImage;
use crate::model::{ImageFormat, NativeImage};

/// Produce the bytes to write for `raw`.
pub fn to_native(raw: &RawImage) -> NativeImage {
    let (format, data) = match raw.filters.as_slice() {
        [filter] if matches!(filter.as_str(), "DCTDecode" | "DCT") => {
            (ImageFormat::Jpeg, raw.raw.clone())
        }
        [filter] if filter == "JPXDecode" => (ImageFormat::Jpeg2000, raw.raw.clone()),
        [filter] if filter == "JBIG2Decode" => (ImageFormat::Jbig2, raw.raw.clone()),
        [filter] if matches!(filter.as_str(), "CCITTFaxDecode" | "CCF") => {
            (ImageFormat::Ccitt, raw.raw.clone())
        }
        _ if raw.holds_pixels() => {
            let png = raw.decoded.as_deref().and_then(|px| encode_png(raw, px));
            match png {
                Some(png) => (ImageFormat::Png, png),
                None => {
                    log::debug!("Image {:?} kept as stored, pixel layout not supported", raw.id);
                    stored(raw)
                }
            }
        }
        _ => stored(raw),
    };

    NativeImage {
        format,
        data,
        width: raw.width,
        height: raw.height,
    }
}

fn stored(raw: &RawImage) -> (ImageFormat, Vec<u8>) {
    let format = ImageFormat::sniff(&raw.raw).unwrap_or(ImageFormat::Raw);
    (format, raw.raw.clone())
}

/// Encode decoded pixel rows as PNG, if the layout is one we understand.
fn encode_png(raw: &RawImage, pixels: &[u8]) -> Option<Vec<u8>> {
    let width = raw.width.filter(|w| *w > 0)?;
    let height = raw.height.filter(|h| *h > 0)?;
    let components = raw.components?;

    let image = match (components, raw.bits_per_component?) {
        (1, 8) => DynamicImage::ImageLuma8(GrayImage::from_raw(
            width,
            height,
            take_exact(pixels, pixel_len(width, height, 1)?)?,
        )?),
        (1, 1) => DynamicImage::ImageLuma8(GrayImage::from_raw(
            width,
            height,
            unpack_bits(pixels, width as usize, height as usize)?,
        )?),
        (3, 8) => DynamicImage::ImageRgb8(RgbImage::from_raw(
            width,
            height,
            take_exact(pixels, pixel_len(width, height, 3)?)?,
        )?),
        (4, 8) => DynamicImage::ImageRgb8(RgbImage::from_raw(
            width,
            height,
            cmyk_to_rgb(&take_exact(pixels, pixel_len(width, height, 4)?)?),
        )?),
        _ => return None,
    };

    let mut out = Cursor::new(Vec::new());
    match image.write_to(&mut out, CodecFormat::Png) {
        Ok(()) => Some(out.into_inner()),
        Err(e) => {
            log::warn!("PNG encoding failed for image {:?}: {}", raw.id, e);
            None
        }
    }
}

/// Byte length of `width`×`height` pixels, `None` if it does not fit in memory.
fn pixel_len(width: u32, height: u32, components: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(components)
}

fn take_exact(pixels: &[u8], len: usize) -> Option<Vec<u8>> {
    pixels.get(..len).map(<[u8]>::to_vec)
}

/// Expand 1-bit rows (padded to whole bytes) to 8-bit gray; a set bit is white.
fn unpack_bits(pixels: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    let row_bytes = width.div_ceil(8);
    let rows = pixels.get(..row_bytes.checked_mul(height)?)?;

    let mut out = Vec::with_capacity(width.checked_mul(height)?);
    for row in rows.chunks_exact(row_bytes) {
        for x in 0..width {
            let bit = row[x / 8] >> (7 - (x % 8)) & 1;
            out.push(if bit == 1 { 0xFF } else { 0x00 });
        }
    }
    Some(out)
}

fn cmyk_to_rgb(cmyk: &[u8]) -> Vec<u8> {
    cmyk.chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u16;
            let channel = |c: u8| ((255 - c as u16) * k / 255) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}
