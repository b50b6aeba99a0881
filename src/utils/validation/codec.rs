//! PNG decoding and JPEG encoding used when converting uploads.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat, ImageResult};

use super::constants::JPEG_QUALITY;

pub trait ImageCodec {
    fn decode_png(&self, path: &Path) -> ImageResult<DynamicImage>;

    fn encode_jpeg(&self, image: &DynamicImage, path: &Path) -> ImageResult<()>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateCodec {
    quality: u8,
}

impl ImageCrateCodec {
    /// Quality is clamped by the encoder to `1..=100`.
    pub fn with_quality(quality: u8) -> Self {
        Self { quality }
    }
}

impl Default for ImageCrateCodec {
    fn default() -> Self {
        Self::with_quality(JPEG_QUALITY)
    }
}

impl ImageCodec for ImageCrateCodec {
    fn decode_png(&self, path: &Path) -> ImageResult<DynamicImage> {
        let file = File::open(path)?;
        image::load(BufReader::new(file), ImageFormat::Png)
    }

    fn encode_jpeg(&self, image: &DynamicImage, path: &Path) -> ImageResult<()> {
        // JPEG has no alpha channel
        let rgb = image.to_rgb8();

        let mut writer = BufWriter::new(File::create(path)?);
        JpegEncoder::new_with_quality(&mut writer, self.quality).encode_image(&rgb)?;
        writer.flush()?;
        Ok(())
    }
}
