use image::RgbaImage;
use log::debug;

use super::permutation::Permutation;
use crate::algorithm::StegoAlgorithm;
use crate::capacity::{
    ensure_embed_possible, ensure_header_readable, lsb_capacity_bits, validate_header_length,
};
use crate::media::codec_options::{EmbeddingSettings, HEADER_BITS};
use crate::media::payload::{bits_to_bytes, unframe, SecretData};
use crate::result::Result;

const RED: usize = 0;
const BLUE: usize = 2;

/// Least significant bit embedding.
///
/// Every pixel site carries two bits, one in the red and one in the blue channel.
/// Sites are visited in a key seeded order, see [`Permutation`]; header and
/// payload share one continuous walk through that order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lsb;

impl Lsb {
    /// Pixel coordinates in placement order
    fn sites(
        image: &RgbaImage,
        settings: Option<&EmbeddingSettings>,
    ) -> impl Iterator<Item = (u32, u32)> {
        let (width, height) = image.dimensions();
        let key = settings.map(|s| s.key_or_empty()).unwrap_or_default();

        Permutation::from_key(key, width as usize * height as usize)
            .map(move |i| ((i % width as usize) as u32, (i / width as usize) as u32))
    }

    /// Reads `count` bits from the next sites, two per site
    fn read_bits(
        image: &RgbaImage,
        sites: &mut impl Iterator<Item = (u32, u32)>,
        count: usize,
    ) -> Vec<bool> {
        let mut bits = Vec::with_capacity(count);
        for (x, y) in sites.take(count.div_ceil(2)) {
            let pixel = image.get_pixel(x, y);
            bits.push(unveil_bit(pixel.0[RED]));
            if bits.len() < count {
                bits.push(unveil_bit(pixel.0[BLUE]));
            }
        }

        bits
    }
}

impl StegoAlgorithm for Lsb {
    fn embed(
        &self,
        image: &mut RgbaImage,
        secret: &SecretData,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<()> {
        let (width, height) = image.dimensions();
        let bits = secret.frame()?;
        debug!(
            "LSB: embedding {} bits into {width}x{height} image",
            bits.len()
        );
        ensure_embed_possible(bits.len(), self.capacity_bits(width, height))?;

        for (pair, (x, y)) in bits.chunks(2).zip(Self::sites(image, settings)) {
            let pixel = image.get_pixel_mut(x, y);
            hide_bit(&mut pixel.0[RED], pair[0]);
            if let Some(bit) = pair.get(1) {
                hide_bit(&mut pixel.0[BLUE], *bit);
            }
        }

        Ok(())
    }

    fn decode(&self, image: &RgbaImage, settings: Option<&EmbeddingSettings>) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let capacity = self.capacity_bits(width, height);
        ensure_header_readable(capacity)?;

        let mut sites = Self::sites(image, settings);
        let header = Self::read_bits(image, &mut sites, HEADER_BITS);
        let length = unframe(&header)?;
        let payload_bits = validate_header_length(length, capacity)?;
        debug!("LSB: decoding {payload_bits} bits from {width}x{height} image");

        // the walk continues right after the header sites
        let payload = Self::read_bits(image, &mut sites, payload_bits);

        bits_to_bytes(&payload)
    }

    fn read_header_length(
        &self,
        image: &RgbaImage,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<i32> {
        let (width, height) = image.dimensions();
        ensure_header_readable(self.capacity_bits(width, height))?;

        let mut sites = Self::sites(image, settings);
        unframe(&Self::read_bits(image, &mut sites, HEADER_BITS))
    }

    fn capacity_bits(&self, width: u32, height: u32) -> usize {
        lsb_capacity_bits(width, height)
    }
}

#[inline]
fn hide_bit(channel: &mut u8, bit: bool) {
    *channel = if bit { *channel | 1 } else { *channel & !1 };
}

#[inline]
fn unveil_bit(channel: u8) -> bool {
    (channel & 1) != 0
}
