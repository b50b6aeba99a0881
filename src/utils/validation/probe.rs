//! Content inspection of uploaded files.

use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

use image::ImageReader;
use log::debug;

use super::types::ImageType;

/// Answers questions about a file by looking at its bytes.
pub trait ImageProbe {
    /// MIME type of the file, if one can be determined.
    fn detect_mime_type(&self, path: &Path) -> Option<String>;

    /// Image format of the file; `None` when it isn't a recognized image or
    /// can't be read.
    fn detect_image_format(&self, path: &Path) -> Option<ImageType>;

    /// Pixel width and height of the image.
    fn detect_dimensions(&self, path: &Path) -> Option<(u32, u32)>;
}

/// Probe backed by `infer` magic numbers and the `image` decoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentProbe;

impl ContentProbe {
    /// Opens a reader with the format guessed from content only. Opening via
    /// `ImageReader::open` would seed the format from the extension.
    fn reader(path: &Path) -> Option<ImageReader<BufReader<File>>> {
        let file = File::open(path)
            .map_err(|e| debug!("Cannot open {}: {}", path.display(), e))
            .ok()?;

        ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| debug!("Cannot read {}: {}", path.display(), e))
            .ok()
    }
}

impl ImageProbe for ContentProbe {
    fn detect_mime_type(&self, path: &Path) -> Option<String> {
        match infer::get_from_path(path) {
            Ok(Some(kind)) => return Some(kind.mime_type().to_string()),
            Ok(None) => {}
            Err(e) => debug!("Cannot sniff {}: {}", path.display(), e),
        }

        // Magic numbers say nothing about text formats
        mime_guess::from_path(path).first_raw().map(str::to_string)
    }

    fn detect_image_format(&self, path: &Path) -> Option<ImageType> {
        let format = Self::reader(path)?.format()?;
        let image_type = ImageType::from_format(format);
        debug!("Detected {} as {:?}", path.display(), image_type);
        image_type
    }

    fn detect_dimensions(&self, path: &Path) -> Option<(u32, u32)> {
        Self::reader(path)?
            .into_dimensions()
            .map_err(|e| debug!("Cannot read dimensions of {}: {}", path.display(), e))
            .ok()
    }
}
