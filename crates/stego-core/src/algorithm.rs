//! The algorithm abstraction shared by both embedding variants.
//!
//! [`AlgorithmVariant`] is the closed tag callers pass around, [`Algorithm`]
//! is the engine it resolves to. Dispatch goes through `enum_dispatch`, there
//! is no open ended lookup.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use image::RgbaImage;

use crate::error::StegoError;
use crate::media::codec_options::EmbeddingSettings;
use crate::media::image::{Lsb, ZhaoKoch};
use crate::media::payload::SecretData;
use crate::result::Result;

/// Capabilities every embedding algorithm offers
#[enum_dispatch]
pub trait StegoAlgorithm {
    /// Hides the framed secret in the image, in place.
    /// Fails with `InsufficientCapacity` before any pixel is changed.
    fn embed(
        &self,
        image: &mut RgbaImage,
        secret: &SecretData,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<()>;

    /// Recovers the secret bytes, the image is only read.
    fn decode(&self, image: &RgbaImage, settings: Option<&EmbeddingSettings>) -> Result<Vec<u8>>;

    /// Reads the raw length header, without judging its plausibility.
    fn read_header_length(
        &self,
        image: &RgbaImage,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<i32>;

    /// Capacity in bits of an image of the given size, header included
    fn capacity_bits(&self, width: u32, height: u32) -> usize;

    fn is_embed_possible(&self, image: &RgbaImage, bit_count: usize) -> bool {
        let (width, height) = image.dimensions();
        bit_count <= self.capacity_bits(width, height)
    }
}

/// An embedding engine, resolved from an [`AlgorithmVariant`]
#[enum_dispatch(StegoAlgorithm)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Lsb(Lsb),
    ZhaoKoch(ZhaoKoch),
}

impl Algorithm {
    pub fn variant(&self) -> AlgorithmVariant {
        match self {
            Algorithm::Lsb(_) => AlgorithmVariant::Lsb,
            Algorithm::ZhaoKoch(_) => AlgorithmVariant::ZhaoKoch,
        }
    }
}

/// Tag naming one of the embedding algorithms
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmVariant {
    /// Least significant bits of red and blue at keyed pixel positions
    #[default]
    Lsb,
    /// Relationship of two DCT coefficients per 8x8 luma block
    ZhaoKoch,
}

impl AlgorithmVariant {
    /// Factory, resolves the tag to its engine
    pub fn create(self) -> Algorithm {
        match self {
            AlgorithmVariant::Lsb => Lsb.into(),
            AlgorithmVariant::ZhaoKoch => ZhaoKoch.into(),
        }
    }
}

impl From<AlgorithmVariant> for Algorithm {
    fn from(variant: AlgorithmVariant) -> Self {
        variant.create()
    }
}

/// Resolves a textual tag such as `"lsb"` or `"zhao-koch"` to its engine
pub fn create(tag: &str) -> Result<Algorithm> {
    Ok(tag.parse::<AlgorithmVariant>()?.create())
}

impl FromStr for AlgorithmVariant {
    type Err = StegoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lsb" | "0" => Ok(AlgorithmVariant::Lsb),
            "zhaokoch" | "zhao-koch" | "zhao_koch" | "1" => Ok(AlgorithmVariant::ZhaoKoch),
            _ => Err(StegoError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<u8> for AlgorithmVariant {
    type Error = StegoError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(AlgorithmVariant::Lsb),
            1 => Ok(AlgorithmVariant::ZhaoKoch),
            other => Err(StegoError::InvalidAlgorithm(other.to_string())),
        }
    }
}

impl Display for AlgorithmVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmVariant::Lsb => write!(f, "lsb"),
            AlgorithmVariant::ZhaoKoch => write!(f, "zhao-koch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_noise_image;

    #[test]
    fn factory_should_create_the_requested_engine() {
        assert_eq!(AlgorithmVariant::Lsb.create(), Algorithm::Lsb(Lsb));
        assert_eq!(AlgorithmVariant::ZhaoKoch.create(), Algorithm::ZhaoKoch(ZhaoKoch));
        assert_eq!(create("LSB").unwrap().variant(), AlgorithmVariant::Lsb);
        assert_eq!(create("zhao-koch").unwrap().variant(), AlgorithmVariant::ZhaoKoch);
        assert_eq!(create("ZhaoKoch").unwrap().variant(), AlgorithmVariant::ZhaoKoch);
        assert_eq!(create("1").unwrap().variant(), AlgorithmVariant::ZhaoKoch);
    }

    #[test]
    fn factory_should_reject_unknown_tags() {
        match create("f5") {
            Err(StegoError::InvalidAlgorithm(tag)) => assert_eq!(tag, "f5"),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            AlgorithmVariant::try_from(99),
            Err(StegoError::InvalidAlgorithm(_))
        ));
        assert_eq!(AlgorithmVariant::try_from(1).unwrap(), AlgorithmVariant::ZhaoKoch);
    }

    #[test]
    fn display_should_parse_back() {
        for variant in [AlgorithmVariant::Lsb, AlgorithmVariant::ZhaoKoch] {
            assert_eq!(variant.to_string().parse::<AlgorithmVariant>().unwrap(), variant);
        }
    }

    #[test]
    fn is_embed_possible_should_follow_the_capacity() {
        let image = prepare_noise_image(16, 16);
        let lsb = AlgorithmVariant::Lsb.create();
        let zhao_koch = AlgorithmVariant::ZhaoKoch.create();

        assert!(lsb.is_embed_possible(&image, 512));
        assert!(!lsb.is_embed_possible(&image, 513));
        assert!(zhao_koch.is_embed_possible(&image, 4));
        assert!(!zhao_koch.is_embed_possible(&image, 5));
    }
}
