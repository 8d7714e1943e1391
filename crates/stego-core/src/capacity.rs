//! Capacity arithmetic and the feasibility checks every algorithm runs
//! before touching a single pixel.

use log::warn;

use crate::algorithm::AlgorithmVariant;
use crate::error::StegoError;
use crate::media::codec_options::{HEADER_BITS, HEADER_BYTES};
use crate::media::image::dct::BLOCK_SIZE;
use crate::media::payload::framed_bit_count;
use crate::result::Result;

/// Bits per pixel used by LSB, one in red and one in blue
pub const LSB_BITS_PER_PIXEL: usize = 2;

/// LSB capacity in bits, header included
pub fn lsb_capacity_bits(width: u32, height: u32) -> usize {
    LSB_BITS_PER_PIXEL * width as usize * height as usize
}

/// Zhao-Koch capacity in bits, one bit per complete 8x8 block
pub fn zhao_koch_capacity_bits(width: u32, height: u32) -> usize {
    (width as usize / BLOCK_SIZE) * (height as usize / BLOCK_SIZE)
}

/// Capacity in bits of an image of the given size for the given algorithm, header included
pub fn capacity_bits(variant: AlgorithmVariant, width: u32, height: u32) -> usize {
    match variant {
        AlgorithmVariant::Lsb => lsb_capacity_bits(width, height),
        AlgorithmVariant::ZhaoKoch => zhao_koch_capacity_bits(width, height),
    }
}

/// Payload bytes that fit next to the header, 0 if not even the header fits
pub fn capacity_bytes(variant: AlgorithmVariant, width: u32, height: u32) -> usize {
    payload_bytes_for(capacity_bits(variant, width, height))
}

/// Whether `byte_count` payload bytes fit into the image
pub fn can_embed(byte_count: usize, variant: AlgorithmVariant, width: u32, height: u32) -> bool {
    framed_bit_count(byte_count)
        .is_some_and(|bits| bits <= capacity_bits(variant, width, height))
}

pub(crate) fn payload_bytes_for(capacity_bits: usize) -> usize {
    (capacity_bits / 8).saturating_sub(HEADER_BYTES)
}

/// Fails with `InsufficientCapacity` if `bit_count` bits exceed `capacity_bits`
pub fn ensure_embed_possible(bit_count: usize, capacity_bits: usize) -> Result<()> {
    if bit_count > capacity_bits {
        return Err(StegoError::InsufficientCapacity {
            required: bit_count,
            available: capacity_bits,
        });
    }

    Ok(())
}

/// Fails with `DecodeError` if the image is too small to even carry a header,
/// such an image cannot hold a secret.
pub fn ensure_header_readable(capacity_bits: usize) -> Result<()> {
    if capacity_bits < HEADER_BITS {
        warn!("image offers {capacity_bits} bits, not even a header fits");
        return Err(StegoError::DecodeError {
            length: 0,
            available: 0,
        });
    }

    Ok(())
}

/// Turns a header length into the payload bit count, or a `DecodeError` if the
/// length is non positive or larger than what the image can carry.
pub fn validate_header_length(length: i32, capacity_bits: usize) -> Result<usize> {
    let available = payload_bytes_for(capacity_bits);
    if length <= 0 || length as usize > available {
        warn!("rejecting header length {length}, image carries at most {available} bytes");
        return Err(StegoError::DecodeError { length, available });
    }

    Ok(length as usize * 8)
}
