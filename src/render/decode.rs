use std::{io::Cursor, sync::Arc};

use crate::foundation::error::{LayermintError, LayermintResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded trait layer in straight (non-premultiplied) RGBA8 form.
pub struct LayerImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major straight RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

impl LayerImage {
    /// Build a layer from straight RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> LayermintResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(LayermintError::render(format!(
                "expected {expected} bytes for a {width}x{height} rgba8 layer, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba),
        })
    }
}

/// Decode any supported image format into a straight RGBA8 layer.
///
/// Images without an alpha channel are treated as fully opaque.
pub fn decode_layer(bytes: &[u8]) -> LayermintResult<LayerImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LayermintError::render(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    LayerImage::from_rgba8(width, height, rgba.into_raw())
}

/// Encode straight RGBA8 pixels as PNG bytes.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> LayermintResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| {
        LayermintError::render(format!(
            "pixel buffer of {} bytes does not match {width}x{height}",
            rgba.len()
        ))
    })?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| LayermintError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/decode.rs"]
mod tests;
