use image::RgbaImage;
use log::debug;

use super::dct::{self, Matrix, BLOCK_SIZE};
use super::luma::LumaBlock;
use crate::algorithm::StegoAlgorithm;
use crate::capacity::{
    ensure_embed_possible, ensure_header_readable, validate_header_length,
    zhao_koch_capacity_bits,
};
use crate::error::StegoError;
use crate::media::codec_options::{EmbeddingSettings, DEFAULT_MARGIN, HEADER_BITS};
use crate::media::payload::{bits_to_bytes, unframe, SecretData};
use crate::result::Result;

/// First coefficient of the compared pair
const K1: (usize, usize) = (3, 4);
/// Second coefficient of the compared pair
const K2: (usize, usize) = (4, 3);

/// Added on top of `d` when writing; reading tests against `d` alone
const WRITE_MARGIN_EXTRA: i32 = 5;

/// No coefficient of an 8x8 block of 8 bit samples exceeds this magnitude
const MAX_COEFFICIENT: f64 = 1024.0;

/// Zhao-Koch embedding in the frequency domain.
///
/// One bit per 8x8 luma block: a `1` makes `|k1| - |k2|` clearly negative,
/// a `0` makes it clearly positive. Blocks are taken left to right, top to
/// bottom; incomplete blocks at the right and bottom edge are never used.
///
/// Channels are clamped to `0..=255` when a block is written back. On carriers
/// that are saturated, like solid black or fully saturated colors, the clamp
/// undoes the coefficient adjustment: `embed` succeeds but the secret cannot
/// be decoded again. Carriers with midrange content are not affected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZhaoKoch;

impl ZhaoKoch {
    /// Top left corners of all complete blocks, row by row
    fn blocks(image: &RgbaImage) -> impl Iterator<Item = (u32, u32)> {
        let step = BLOCK_SIZE as u32;
        let blocks_wide = image.width() / step;
        let blocks_tall = image.height() / step;

        (0..blocks_tall)
            .flat_map(move |by| (0..blocks_wide).map(move |bx| (bx * step, by * step)))
    }

    fn margin(settings: Option<&EmbeddingSettings>) -> i32 {
        settings.map(|s| s.d).unwrap_or(DEFAULT_MARGIN)
    }

    /// `d + 5`, rejected if no block could ever separate its coefficients that far
    fn write_margin(settings: Option<&EmbeddingSettings>) -> Result<f64> {
        let margin = Self::margin(settings) as f64 + WRITE_MARGIN_EXTRA as f64;
        if margin > MAX_COEFFICIENT {
            return Err(StegoError::InvalidData(format!(
                "margin d = {} is out of reach for 8 bit samples",
                Self::margin(settings)
            )));
        }

        Ok(margin)
    }

    /// Reads one bit per block from the next `count` blocks
    fn read_bits(
        image: &RgbaImage,
        blocks: &mut impl Iterator<Item = (u32, u32)>,
        count: usize,
        d: i32,
    ) -> Result<Vec<bool>> {
        blocks
            .take(count)
            .map(|(x0, y0)| -> Result<bool> {
                let coefficients = dct::forward(&LumaBlock::read(image, x0, y0).y_matrix())?;
                Ok(read_bit(&coefficients, d))
            })
            .collect()
    }
}

impl StegoAlgorithm for ZhaoKoch {
    fn embed(
        &self,
        image: &mut RgbaImage,
        secret: &SecretData,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<()> {
        let (width, height) = image.dimensions();
        let bits = secret.frame()?;
        debug!(
            "Zhao-Koch: embedding {} bits into {width}x{height} image",
            bits.len()
        );
        ensure_embed_possible(bits.len(), self.capacity_bits(width, height))?;
        let margin = Self::write_margin(settings)?;

        for (bit, (x0, y0)) in bits.into_iter().zip(Self::blocks(image)) {
            let mut block = LumaBlock::read(image, x0, y0);
            let mut coefficients = dct::forward(&block.y_matrix())?;
            insert_bit(&mut coefficients, bit, margin);
            block.set_y_matrix(&dct::inverse(&coefficients)?)?;
            block.write(image, x0, y0);
        }

        Ok(())
    }

    fn decode(&self, image: &RgbaImage, settings: Option<&EmbeddingSettings>) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let capacity = self.capacity_bits(width, height);
        ensure_header_readable(capacity)?;
        let d = Self::margin(settings);

        let mut blocks = Self::blocks(image);
        let header = Self::read_bits(image, &mut blocks, HEADER_BITS, d)?;
        let length = unframe(&header)?;
        let payload_bits = validate_header_length(length, capacity)?;
        debug!("Zhao-Koch: decoding {payload_bits} bits from {width}x{height} image");

        let payload = Self::read_bits(image, &mut blocks, payload_bits, d)?;

        bits_to_bytes(&payload)
    }

    fn read_header_length(
        &self,
        image: &RgbaImage,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<i32> {
        let (width, height) = image.dimensions();
        ensure_header_readable(self.capacity_bits(width, height))?;

        let mut blocks = Self::blocks(image);
        let header = Self::read_bits(image, &mut blocks, HEADER_BITS, Self::margin(settings))?;
        unframe(&header)
    }

    fn capacity_bits(&self, width: u32, height: u32) -> usize {
        zhao_koch_capacity_bits(width, height)
    }
}

/// Pushes `|k1| - |k2|` below `-margin` for a `1`, above `margin` for a `0`.
///
/// Every step moves one coefficient a full unit away from zero, so the
/// difference changes by at least 1 per iteration and the loop ends.
fn insert_bit(coefficients: &mut Matrix, bit: bool, margin: f64) {
    let mut k1 = coefficients[K1.0][K1.1];
    let mut k2 = coefficients[K2.0][K2.1];

    if bit {
        while k1.abs() - k2.abs() >= -margin {
            k1 = toward_zero(k1);
            k2 = away_from_zero(k2);
        }
    } else {
        while k1.abs() - k2.abs() <= margin {
            k1 = away_from_zero(k1);
            k2 = toward_zero(k2);
        }
    }

    coefficients[K1.0][K1.1] = k1;
    coefficients[K2.0][K2.1] = k2;
}

fn read_bit(coefficients: &Matrix, d: i32) -> bool {
    let k1 = coefficients[K1.0][K1.1];
    let k2 = coefficients[K2.0][K2.1];

    k1.abs() - k2.abs() < -(d as f64)
}

#[inline]
fn toward_zero(v: f64) -> f64 {
    if v.abs() <= 1.0 {
        0.0
    } else {
        v - v.signum()
    }
}

#[inline]
fn away_from_zero(v: f64) -> f64 {
    if v < 0.0 {
        v - 1.0
    } else {
        v + 1.0
    }
}
