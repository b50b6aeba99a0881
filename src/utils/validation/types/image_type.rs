//! Image format tags, obtained by inspecting file content rather than the
//! file name.

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Represents the recognized image encodings an upload can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Gif,
    Jpeg,
    Png,
    Bmp,
    Tiff,
    WebP,
    Ico,
}

impl ImageType {
    /// Maps a format detected by the `image` crate to a tag, if we know it.
    pub fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Tiff => Some(Self::Tiff),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Ico => Some(Self::Ico),
            _ => None,
        }
    }
}
