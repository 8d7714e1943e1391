use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use image::io::Reader as ImageReader;
use image::ImageFormat;
pub use image::RgbaImage;
use log::error;

use crate::error::StegoError;
use crate::result::Result;

use super::Persist;

/// A carrier image, decoded to 8 bit RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    image: RgbaImage,
}

impl Media {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Opens a PNG, BMP or JPEG file, the format is guessed from the content
    pub fn from_file(f: &Path) -> Result<Self> {
        let reader = ImageReader::open(f).map_err(|e| {
            error!("Error opening file {f:?}: {e}");
            StegoError::ReadError { source: e }
        })?;

        Self::decode(reader.with_guessed_format()?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(ImageReader::new(Cursor::new(bytes)).with_guessed_format()?)
    }

    fn decode<R: std::io::BufRead + Seek>(reader: ImageReader<R>) -> Result<Self> {
        if reader.format().is_none() {
            error!("Error decoding image: unknown format");
            return Err(StegoError::UnsupportedFormat);
        }
        let image = reader
            .decode()
            .map_err(|e| {
                error!("Error decoding image: {e}");
                StegoError::UnsupportedFormat
            })?
            .to_rgba8();

        if image.width() == 0 || image.height() == 0 {
            return Err(StegoError::InvalidImageMedia);
        }

        Ok(Self { image })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Writes the image in the given format.
    /// JPEG drops the alpha channel and is lossy, an LSB payload will not survive it.
    pub fn save_to_writer<W: Write + Seek>(
        &self,
        mut writer: W,
        format: ImageFormat,
    ) -> Result<()> {
        let result = match format {
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(self.image.clone())
                .to_rgb8()
                .write_to(&mut writer, format),
            _ => self.image.write_to(&mut writer, format),
        };

        result.map_err(|e| {
            error!("Error saving image: {e}");
            StegoError::ImageEncodingError
        })
    }
}

/// Output format for a file name, PNG unless the extension says otherwise
pub fn format_for_path(path: &Path) -> ImageFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("bmp") => ImageFormat::Bmp,
        Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    }
}

impl Persist for Media {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            StegoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        self.save_to_writer(&mut writer, format_for_path(file))?;

        writer.flush().map_err(|e| StegoError::WriteError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_5x5_image, prepare_noise_image};
    use tempfile::TempDir;

    #[test]
    fn should_pick_format_from_extension() {
        assert_eq!(format_for_path(Path::new("a.png")), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("a.BMP")), ImageFormat::Bmp);
        assert_eq!(format_for_path(Path::new("a.jpeg")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.JPG")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.webp")), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("no_extension")), ImageFormat::Png);
    }

    #[test]
    fn should_round_trip_png_bytes() {
        let media = Media::from_image(prepare_5x5_image());
        let mut buffer = Cursor::new(Vec::new());
        media
            .save_to_writer(&mut buffer, ImageFormat::Png)
            .expect("Cannot write png");

        let reloaded = Media::from_bytes(buffer.get_ref()).expect("Cannot read png");

        assert_eq!(reloaded, media);
    }

    #[test]
    fn should_save_and_open_bmp_files() {
        let out_dir = TempDir::new().unwrap();
        let target = out_dir.path().join("carrier.bmp");
        let mut media = Media::from_image(prepare_noise_image(9, 7));

        media.save_as(&target).expect("Cannot save bmp");
        let reloaded = Media::from_file(&target).expect("Cannot open bmp");

        assert_eq!(reloaded.image(), media.image());
    }

    #[test]
    fn should_reject_garbage_bytes() {
        let result = Media::from_bytes(b"definitely not an image");

        assert!(matches!(result, Err(StegoError::UnsupportedFormat)));
    }

    #[test]
    fn should_report_missing_files_as_read_errors() {
        let out_dir = TempDir::new().unwrap();
        let result = Media::from_file(&out_dir.path().join("missing.png"));

        assert!(matches!(result, Err(StegoError::ReadError { .. })));
    }
}
