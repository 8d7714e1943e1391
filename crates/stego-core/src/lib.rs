//! # Stego Core
//!
//! Hides a byte payload inside an RGBA image and recovers it again.
//! Two algorithms are available, see [`AlgorithmVariant`]:
//! - LSB, least significant bits of red and blue at pixel positions chosen by a key
//! - Zhao-Koch, the relationship of two DCT coefficients per 8x8 luma block
//!
//! Both prepend the payload with a 32 bit length header, so the reading side
//! only needs the image, the algorithm and the settings.
//!
//! # Usage Examples
//!
//! ## Hide data inside an image
//!
//! ```rust
//! use stego_core::{AlgorithmVariant, EmbeddingSettings};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! image::RgbaImage::from_pixel(64, 64, image::Rgba([100, 150, 200, 255]))
//!     .save(&carrier)
//!     .unwrap();
//!
//! stego_core::api::embed::prepare()
//!     .with_secret("Hello, World!")
//!     .with_image(&carrier)
//!     .using_algorithm(AlgorithmVariant::Lsb)
//!     .with_settings(EmbeddingSettings::default().with_key("SuperSecret42"))
//!     .with_output(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Decode data from an image
//!
//! ```rust
//! use stego_core::{AlgorithmVariant, EmbeddingSettings, Stego};
//!
//! // one bit per 8x8 block, 256 blocks
//! let carrier = image::RgbaImage::from_pixel(128, 128, image::Rgba([100, 150, 200, 255]));
//! let mut stego = Stego::new(carrier);
//! stego.set_secret_data(b"Hello, World!".to_vec()).unwrap();
//! stego.embed(AlgorithmVariant::ZhaoKoch, None).unwrap();
//!
//! let secret = stego
//!     .decode(AlgorithmVariant::ZhaoKoch, None)
//!     .expect("Failed to decode message from image");
//! assert_eq!(secret, b"Hello, World!");
//! ```

#![warn(clippy::redundant_else)]

pub mod algorithm;
pub mod api;
pub mod capacity;
pub mod error;
pub mod media;
pub mod result;
pub mod stego;

pub use algorithm::{create, Algorithm, AlgorithmVariant, StegoAlgorithm};
pub use error::StegoError;
pub use media::{EmbeddingSettings, Media, Persist, SecretData};
pub use result::Result;
pub use stego::Stego;

#[cfg(test)]
pub(crate) mod test_utils {
    use image::{ImageBuffer, Rgba, RgbaImage};

    /// 5x5 image with distinct, predictable channel values
    pub fn prepare_5x5_image() -> RgbaImage {
        ImageBuffer::from_fn(5, 5, |x, y| {
            let i = (4 * x + 20 * y) as u8;
            Rgba([i, i + 1, i + 2, i + 3])
        })
    }

    /// Opaque noise in `64..=191`, far enough from the channel limits that
    /// luma adjustments never clamp. Same size, same image.
    pub fn prepare_noise_image(width: u32, height: u32) -> RgbaImage {
        let mut rng = fastrand::Rng::with_seed(0x5eed_0000 + (width as u64) * 31 + height as u64);
        ImageBuffer::from_fn(width, height, |_, _| {
            Rgba([rng.u8(64..=191), rng.u8(64..=191), rng.u8(64..=191), 255])
        })
    }
}
