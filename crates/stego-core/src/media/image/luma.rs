//! RGB to YCbCr conversion (JFIF, full range) and 8x8 block access.

use image::{Rgba, RgbaImage};

use super::dct::{Matrix, BLOCK_SIZE};
use crate::error::StegoError;
use crate::result::Result;

/// One pixel in luma/chroma representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelLuma {
    pub y: f64,
    pub cb: f64,
    pub cr: f64,
}

impl PixelLuma {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        Self {
            y: 0.299 * r + 0.587 * g + 0.114 * b,
            cb: -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0,
            cr: 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0,
        }
    }

    /// Back to RGB, every channel is clamped to `0..=255` and truncated
    pub fn to_rgb(&self) -> [u8; 3] {
        // `as u8` saturates and truncates towards zero
        [
            (self.y + 1.402 * (self.cr - 128.0)) as u8,
            (self.y - 0.34414 * (self.cb - 128.0) - 0.71414 * (self.cr - 128.0)) as u8,
            (self.y + 1.772 * (self.cb - 128.0)) as u8,
        ]
    }

    /// Same chroma, different luma
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

impl From<&Rgba<u8>> for PixelLuma {
    fn from(pixel: &Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self::from_rgb(r, g, b)
    }
}

/// An 8x8 pixel window converted to luma/chroma, indexed `[row][column]`
#[derive(Debug, Clone, PartialEq)]
pub struct LumaBlock {
    pixels: [[PixelLuma; BLOCK_SIZE]; BLOCK_SIZE],
    alpha: [[u8; BLOCK_SIZE]; BLOCK_SIZE],
}

impl LumaBlock {
    /// Reads the window whose top left corner is `(x0, y0)`.
    ///
    /// The caller guarantees the whole window lies inside the image.
    pub fn read(image: &RgbaImage, x0: u32, y0: u32) -> Self {
        let mut pixels = [[PixelLuma::from_rgb(0, 0, 0); BLOCK_SIZE]; BLOCK_SIZE];
        let mut alpha = [[0u8; BLOCK_SIZE]; BLOCK_SIZE];
        let rows = pixels.iter_mut().zip(alpha.iter_mut());
        for (row, (luma_row, alpha_row)) in rows.enumerate() {
            let cols = luma_row.iter_mut().zip(alpha_row.iter_mut());
            for (col, (luma, a)) in cols.enumerate() {
                let pixel = image.get_pixel(x0 + col as u32, y0 + row as u32);
                *luma = pixel.into();
                *a = pixel.0[3];
            }
        }

        Self { pixels, alpha }
    }

    /// The luma plane of the block
    pub fn y_matrix(&self) -> Matrix {
        self.pixels
            .iter()
            .map(|row| row.iter().map(|p| p.y).collect())
            .collect()
    }

    /// Replaces the luma plane, chroma stays untouched
    pub fn set_y_matrix(&mut self, y: &[Vec<f64>]) -> Result<()> {
        if y.len() != BLOCK_SIZE || y.iter().any(|row| row.len() != BLOCK_SIZE) {
            return Err(StegoError::InvalidData(format!(
                "luma matrix has to be {BLOCK_SIZE}x{BLOCK_SIZE}"
            )));
        }
        for (pixel_row, y_row) in self.pixels.iter_mut().zip(y) {
            for (pixel, y) in pixel_row.iter_mut().zip(y_row) {
                *pixel = pixel.with_y(*y);
            }
        }

        Ok(())
    }

    /// Writes the block back at `(x0, y0)`, alpha is preserved
    pub fn write(&self, image: &mut RgbaImage, x0: u32, y0: u32) {
        let rows = self.pixels.iter().zip(self.alpha.iter());
        for (row, (luma_row, alpha_row)) in rows.enumerate() {
            for (col, (luma, a)) in luma_row.iter().zip(alpha_row).enumerate() {
                let [r, g, b] = luma.to_rgb();
                image.put_pixel(x0 + col as u32, y0 + row as u32, Rgba([r, g, b, *a]));
            }
        }
    }
}
