use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::StegoError;
use crate::media::codec_options::{HEADER_BITS, HEADER_BYTES};
use crate::result::Result;

/// The secret bytes that are going to be hidden, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretData {
    bytes: Vec<u8>,
}

impl SecretData {
    /// Wraps the given bytes, the length has to fit into the signed 32 bit header
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if i32::try_from(bytes.len()).is_err() {
            return Err(StegoError::InvalidData(format!(
                "secret of {} bytes does not fit into the length header",
                bytes.len()
            )));
        }

        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The length as it is written into the header
    pub fn byte_length(&self) -> i32 {
        // bounded by `new`
        self.bytes.len() as i32
    }

    /// Number of bits `frame` is going to produce, `None` if that overflows `usize`
    pub fn framed_bit_count(&self) -> Option<usize> {
        framed_bit_count(self.bytes.len())
    }

    /// Header bits (little endian i32) followed by the payload bits,
    /// every byte expanded most significant bit first.
    pub fn frame(&self) -> Result<Vec<bool>> {
        let mut framed = Vec::with_capacity(HEADER_BYTES + self.bytes.len());
        framed.write_i32::<LittleEndian>(self.byte_length())?;
        framed.extend_from_slice(&self.bytes);

        bytes_to_bits(&framed)
    }
}

/// Bits needed to hide `byte_count` payload bytes, header included.
/// `None` if the count does not fit into `usize`.
pub fn framed_bit_count(byte_count: usize) -> Option<usize> {
    byte_count
        .checked_mul(8)
        .and_then(|bits| bits.checked_add(HEADER_BITS))
}

/// Decodes the 32 header bits back into the announced payload length.
///
/// A non positive value, or one that exceeds the capacity of the image,
/// is not an error here. The caller has to turn it into a decode failure.
pub fn unframe(header_bits: &[bool]) -> Result<i32> {
    if header_bits.len() != HEADER_BITS {
        return Err(StegoError::InvalidData(format!(
            "a header has exactly {HEADER_BITS} bits, got {}",
            header_bits.len()
        )));
    }
    let header = bits_to_bytes(header_bits)?;

    Ok(Cursor::new(header).read_i32::<LittleEndian>()?)
}

/// Expands bytes into bits, most significant bit first
pub fn bytes_to_bits(bytes: &[u8]) -> Result<Vec<bool>> {
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let bits = (0..bytes.len() * 8)
        .map(|_| reader.read_bit())
        .collect::<std::io::Result<Vec<bool>>>()?;

    Ok(bits)
}

/// Packs bits into bytes, most significant bit first. A trailing partial byte is zero padded.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    for bit in bits {
        writer.write_bit(*bit)?;
    }
    writer.byte_align()?;

    Ok(writer.into_writer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_count_framed_bits_without_overflowing() {
        assert_eq!(framed_bit_count(0), Some(32));
        assert_eq!(framed_bit_count(12), Some(128));
        assert_eq!(framed_bit_count(usize::MAX / 4), None);
        assert_eq!(framed_bit_count(usize::MAX / 8), None);
        assert_eq!(framed_bit_count(usize::MAX), None);
    }

    #[test]
    fn should_frame_length_little_endian_then_payload_msb_first() {
        let secret = SecretData::new(vec![0b1000_0001, 0b0100_0000]).unwrap();
        let bits = secret.frame().unwrap();

        assert_eq!(bits.len(), 32 + 16);
        assert_eq!(secret.framed_bit_count(), Some(bits.len()));
        // first header byte is 2 (little endian length), msb first
        assert_eq!(
            &bits[0..8],
            &[false, false, false, false, false, false, true, false]
        );
        assert!(bits[8..32].iter().all(|b| !b), "upper length bytes are zero");
        assert_eq!(
            &bits[32..40],
            &[true, false, false, false, false, false, false, true]
        );
        assert_eq!(
            &bits[40..48],
            &[false, true, false, false, false, false, false, false]
        );
    }

    #[test]
    fn should_unframe_the_header_back_to_the_length() {
        let secret = SecretData::new(vec![7; 1666]).unwrap();
        let bits = secret.frame().unwrap();

        assert_eq!(unframe(&bits[..HEADER_BITS]).unwrap(), 1666);
    }

    #[test]
    fn should_unframe_negative_lengths_without_error() {
        let bits = bytes_to_bits(&(-3i32).to_le_bytes()).unwrap();

        assert_eq!(unframe(&bits).unwrap(), -3);
    }

    #[test]
    fn should_reject_headers_of_wrong_size() {
        let result = unframe(&[true; 31]);
        assert!(matches!(result, Err(StegoError::InvalidData(_))));
    }

    #[test]
    fn should_pack_bits_into_bytes() {
        let bytes = b"Hello World!";
        let bits = bytes_to_bits(bytes).unwrap();

        assert_eq!(bits_to_bytes(&bits).unwrap(), bytes.to_vec());
        assert_eq!(bits_to_bytes(&[true, true]).unwrap(), vec![0b1100_0000]);
    }

    #[test]
    fn should_frame_an_empty_secret_as_header_only() {
        let secret = SecretData::new(Vec::new()).unwrap();
        let bits = secret.frame().unwrap();

        assert_eq!(bits.len(), HEADER_BITS);
        assert_eq!(unframe(&bits).unwrap(), 0);
    }
}
