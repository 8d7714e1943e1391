//! The [`Stego`] entry object, a carrier image plus the secret to hide in it.

use std::path::Path;

use image::RgbaImage;

use crate::algorithm::{AlgorithmVariant, StegoAlgorithm};
use crate::capacity;
use crate::error::StegoError;
use crate::media::{EmbeddingSettings, Media, Persist, SecretData};
use crate::result::Result;

/// Owns one carrier image and, optionally, the secret to embed into it.
///
/// ```rust
/// use image::{Rgba, RgbaImage};
/// use stego_core::{AlgorithmVariant, EmbeddingSettings, Stego};
///
/// let carrier = RgbaImage::from_pixel(64, 64, Rgba([90, 120, 150, 255]));
/// let settings = EmbeddingSettings::default().with_key("my key");
///
/// let mut stego = Stego::new(carrier);
/// stego.set_secret_data(b"Hello World!".to_vec()).unwrap();
/// stego.embed(AlgorithmVariant::Lsb, Some(&settings)).unwrap();
///
/// let secret = stego.decode(AlgorithmVariant::Lsb, Some(&settings)).unwrap();
/// assert_eq!(secret, b"Hello World!");
/// ```
#[derive(Debug)]
pub struct Stego {
    media: Media,
    secret: Option<SecretData>,
}

impl Stego {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            media: Media::from_image(image),
            secret: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_media(Media::from_file(path.as_ref())?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_media(Media::from_bytes(bytes)?))
    }

    pub fn from_media(media: Media) -> Self {
        Self {
            media,
            secret: None,
        }
    }

    /// Replaces the secret that the next [`Stego::embed`] will hide
    pub fn set_secret_data(&mut self, bytes: Vec<u8>) -> Result<&mut Self> {
        self.secret = Some(SecretData::new(bytes)?);
        Ok(self)
    }

    pub fn secret_data(&self) -> Option<&[u8]> {
        self.secret.as_ref().map(SecretData::bytes)
    }

    /// Embeds the secret into the carrier with the given algorithm.
    ///
    /// The carrier is left untouched if the secret does not fit.
    /// With [`AlgorithmVariant::ZhaoKoch`] on a saturated carrier, solid black for
    /// example, embedding succeeds but the secret cannot be decoded again, see
    /// [`ZhaoKoch`](crate::media::image::ZhaoKoch).
    pub fn embed(
        &mut self,
        algorithm: AlgorithmVariant,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<&RgbaImage> {
        let secret = self.secret.as_ref().ok_or(StegoError::MissingSecret)?;
        algorithm
            .create()
            .embed(self.media.image_mut(), secret, settings)?;

        Ok(self.media.image())
    }

    pub fn decode(
        &self,
        algorithm: AlgorithmVariant,
        settings: Option<&EmbeddingSettings>,
    ) -> Result<Vec<u8>> {
        algorithm.create().decode(self.media.image(), settings)
    }

    /// Whether `byte_count` bytes of secret fit into the carrier
    pub fn can_embed(&self, byte_count: usize, algorithm: AlgorithmVariant) -> bool {
        let (width, height) = self.media.image().dimensions();
        capacity::can_embed(byte_count, algorithm, width, height)
    }

    /// Secret bytes the carrier can take, the header already subtracted
    pub fn capacity(&self, algorithm: AlgorithmVariant) -> usize {
        let (width, height) = self.media.image().dimensions();
        capacity::capacity_bytes(algorithm, width, height)
    }

    pub fn image(&self) -> &RgbaImage {
        self.media.image()
    }

    pub fn into_image(self) -> RgbaImage {
        self.media.into_image()
    }

    /// Writes the carrier, the format follows the file extension
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.media.save_as(path.as_ref())
    }
}
