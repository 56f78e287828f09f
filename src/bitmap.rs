use image::RgbaImage;

use crate::color::Color;
use crate::error::{PaletteError, Result};

/// A borrowed, read-only view of a decoded image as RGBA8 rows.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Wrap a raw RGBA8 buffer. The buffer must hold exactly
    /// `width * height` pixels; a zero-area bitmap is accepted here and
    /// rejected at extraction time.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PaletteError::invalid_input("bitmap dimensions overflow"))?;
        if data.len() != expected {
            return Err(PaletteError::invalid_input(format!(
                "pixel buffer holds {} bytes, {width}x{height} RGBA needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgba(image: &'a RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Pixel at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.data[i..i + 4];
        Color {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        }
    }
}

impl<'a> From<&'a RgbaImage> for Bitmap<'a> {
    fn from(image: &'a RgbaImage) -> Self {
        Self::from_rgba(image)
    }
}
