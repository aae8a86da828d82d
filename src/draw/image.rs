use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    error::{FlipbookError, FlipbookResult},
    math::premultiply_rgba8_in_place,
};

/// Decoded raster image held as premultiplied RGBA8, shared cheaply between drawings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl ImageData {
    /// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
    pub fn decode(bytes: &[u8]) -> FlipbookResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self::from_premul_rgba8(width, height, rgba8_premul)
    }

    pub fn open(path: impl AsRef<Path>) -> FlipbookResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> FlipbookResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlipbookError::validation("image dimensions must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(FlipbookError::validation(format!(
                "image {width}x{height} exceeds {} pixels per side",
                u16::MAX
            )));
        }
        if data.len() != width as usize * height as usize * 4 {
            return Err(FlipbookError::validation(
                "image byte length must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn premul_rgba8(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/image.rs"]
mod tests;
