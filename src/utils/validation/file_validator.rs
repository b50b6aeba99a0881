//! Validation and persistence of one uploaded file.
//!
//! Checks run in a fixed order and stop at the first failure, so a caller gets
//! exactly one message back. Content-based checks go through an [`ImageProbe`]
//! and never touch the upload itself; only [`FileValidator::save_image`]
//! writes to disk.

use std::{
    ffi::OsString,
    fs::DirBuilder,
    path::{Path, PathBuf},
};

use image::{ImageError, ImageResult};
use log::{debug, info, warn};
use tempfile::NamedTempFile;

use super::codec::{ImageCodec, ImageCrateCodec};
use super::constants::BYTES_PER_MEGABYTE;
use super::probe::{ContentProbe, ImageProbe};
use super::types::{
    DimensionBounds, DimensionCheck, ImageType, SaveError, ValidationError, ValidationRules,
};
use super::upload::UploadHandle;

pub struct FileValidator<'a> {
    file: Option<&'a dyn UploadHandle>,
    probe: Box<dyn ImageProbe + 'a>,
    codec: Box<dyn ImageCodec + 'a>,
}

impl<'a> FileValidator<'a> {
    /// Creates a validator for a possibly missing upload, using the default
    /// content probe and codec.
    pub fn new(file: Option<&'a dyn UploadHandle>) -> Self {
        Self {
            file,
            probe: Box::new(ContentProbe),
            codec: Box::new(ImageCrateCodec::default()),
        }
    }

    pub fn for_file(file: &'a dyn UploadHandle) -> Self {
        Self::new(Some(file))
    }

    /// Replaces the probe used for MIME, format and dimension detection
    pub fn with_probe(mut self, probe: impl ImageProbe + 'a) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replaces the codec used for PNG to JPEG conversion
    pub fn with_codec(mut self, codec: impl ImageCodec + 'a) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn file(&self) -> Option<&'a dyn UploadHandle> {
        self.file
    }

    /// Whether the file name ends with one of `extensions`. Candidates may
    /// carry a leading dot and are compared case-insensitively.
    pub fn is_extension_in_list(&self, extensions: &[&str]) -> bool {
        let Some(file) = self.file else {
            return false;
        };

        let actual = extension_of(file.original_name());
        extensions
            .iter()
            .any(|expected| expected.trim_start_matches('.').eq_ignore_ascii_case(actual))
    }

    /// Whether the file's MIME type is one of `mime_types`. The type sniffed
    /// from content wins over the one declared by the client.
    pub fn is_mime_type_in_list(&self, mime_types: &[&str]) -> bool {
        let Some(file) = self.file else {
            return false;
        };

        let actual = match self.probe.detect_mime_type(file.temp_path()) {
            Some(detected) if !detected.is_empty() => detected,
            _ => file.declared_mime_type().to_string(),
        };
        if actual.is_empty() {
            return false;
        }

        mime_types
            .iter()
            .any(|expected| expected.eq_ignore_ascii_case(&actual))
    }

    /// Whether the file content is an image of one of `image_types`.
    pub fn is_image_type_in_list(&self, image_types: &[ImageType]) -> bool {
        self.file
            .and_then(|file| self.probe.detect_image_format(file.temp_path()))
            .is_some_and(|detected| image_types.contains(&detected))
    }

    /// Checks the image size against each given bound, in the order max
    /// width, max height, min width, min height. An image whose dimensions
    /// cannot be read counts as 0x0.
    pub fn validate_image_dimensions(
        &self,
        max_width: Option<u32>,
        max_height: Option<u32>,
        min_width: Option<u32>,
        min_height: Option<u32>,
    ) -> DimensionCheck {
        let (width, height) = self
            .file
            .and_then(|file| self.probe.detect_dimensions(file.temp_path()))
            .unwrap_or_else(|| {
                debug!("Image dimensions unavailable, assuming 0x0");
                (0, 0)
            });

        if max_width.is_some_and(|max| width > max) {
            return DimensionCheck::TooWide;
        }
        if max_height.is_some_and(|max| height > max) {
            return DimensionCheck::TooTall;
        }
        if min_width.is_some_and(|min| width < min) {
            return DimensionCheck::TooNarrow;
        }
        if min_height.is_some_and(|min| height < min) {
            return DimensionCheck::TooShort;
        }

        DimensionCheck::Ok
    }

    /// Validates presence, size, extension and MIME type, in that order.
    /// A `max_bytes` of zero means no limit.
    pub fn validate(
        &self,
        max_bytes: Option<u64>,
        allowed_extensions: Option<&[&str]>,
        allowed_mime_types: Option<&[&str]>,
    ) -> Result<(), ValidationError> {
        let Some(file) = self.file else {
            return Err(ValidationError::NoFile);
        };

        if let Some(max_bytes) = max_bytes.filter(|&max| max > 0) {
            if file.declared_size() > max_bytes {
                return Err(ValidationError::TooLarge {
                    name: file.original_name().to_string(),
                    max_megabytes: max_bytes / BYTES_PER_MEGABYTE,
                });
            }
        }

        if let Some(extensions) = allowed_extensions {
            if !self.is_extension_in_list(extensions) {
                return Err(ValidationError::Extension { allowed: to_owned_list(extensions) });
            }
        }

        if let Some(mime_types) = allowed_mime_types {
            if !self.is_mime_type_in_list(mime_types) {
                return Err(ValidationError::MimeType { allowed: to_owned_list(mime_types) });
            }
        }

        Ok(())
    }

    /// Validates an image upload: the generic checks without MIME types, then
    /// the image format, then dimensions when at least one bound is positive.
    pub fn validate_image(
        &self,
        max_bytes: Option<u64>,
        allowed_extensions: Option<&[&str]>,
        allowed_image_types: Option<&[ImageType]>,
        bounds: DimensionBounds,
    ) -> Result<(), ValidationError> {
        self.validate(max_bytes, allowed_extensions, None)?;

        if let Some(image_types) = allowed_image_types {
            if !self.is_image_type_in_list(image_types) {
                return Err(ValidationError::ImageType);
            }
        }

        if !bounds.any_positive() {
            return Ok(());
        }

        let DimensionBounds { max_width, max_height, min_width, min_height } = bounds;
        // A check only reports a bound that was set
        match self.validate_image_dimensions(max_width, max_height, min_width, min_height) {
            DimensionCheck::Ok => Ok(()),
            DimensionCheck::TooWide => Err(ValidationError::MaxWidth(max_width.unwrap_or_default())),
            DimensionCheck::TooTall => Err(ValidationError::MaxHeight(max_height.unwrap_or_default())),
            DimensionCheck::TooNarrow => Err(ValidationError::MinWidth(min_width.unwrap_or_default())),
            DimensionCheck::TooShort => Err(ValidationError::MinHeight(min_height.unwrap_or_default())),
        }
    }

    /// Runs the checks a rule set asks for: image validation when it names
    /// image types or dimensions, generic validation otherwise.
    pub fn check(&self, rules: &ValidationRules) -> Result<(), ValidationError> {
        let extensions = as_str_list(&rules.allowed_extensions);

        if rules.is_image_rule_set() {
            self.validate_image(
                rules.max_bytes,
                extensions.as_deref(),
                rules.allowed_image_types.as_deref(),
                rules.bounds(),
            )
        } else {
            let mime_types = as_str_list(&rules.allowed_mime_types);
            self.validate(rules.max_bytes, extensions.as_deref(), mime_types.as_deref())
        }
    }

    /// Saves the upload to `destination`, creating its directory if needed.
    ///
    /// With `convert_png_to_jpg`, a PNG upload is re-encoded as JPEG next to
    /// `destination` under the same stem with a `.jpg` extension, and that
    /// path is returned instead. If the conversion fails the original bytes
    /// are saved at `destination`.
    ///
    /// # Returns
    /// * `Ok(Some(path))` with the path actually written
    /// * `Ok(None)` if copying the upload failed
    /// * `Err` if `destination` is empty or taken, or its directory can't be
    ///   created
    pub fn save_image(
        &self,
        destination: impl AsRef<Path>,
        convert_png_to_jpg: bool,
    ) -> Result<Option<PathBuf>, SaveError> {
        let destination = destination.as_ref();
        if destination.as_os_str().is_empty() {
            return Err(SaveError::EmptyPath);
        }
        if destination.is_file() {
            return Err(SaveError::AlreadyExists(destination.to_path_buf()));
        }

        let Some(file) = self.file else {
            return Err(SaveError::NoFile);
        };

        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        ensure_directory(directory)?;

        if convert_png_to_jpg && self.is_image_type_in_list(&[ImageType::Png]) {
            if let Some(jpg_path) = jpg_sibling(directory, destination) {
                match self.convert_to_jpeg(file, &jpg_path) {
                    Ok(()) => {
                        info!("Saved {} as JPEG to {}", file.original_name(), jpg_path.display());
                        return Ok(Some(jpg_path));
                    }
                    Err(e) => warn!(
                        "PNG to JPEG conversion of {} failed, keeping original: {}",
                        file.original_name(),
                        e
                    ),
                }
            }
        }

        if file.save(destination) {
            info!("Saved {} to {}", file.original_name(), destination.display());
            Ok(Some(destination.to_path_buf()))
        } else {
            Ok(None)
        }
    }

    /// Encodes into a temporary file next to `jpg_path` and only moves it
    /// into place once encoding succeeded, so a failure leaves `jpg_path`
    /// untouched.
    fn convert_to_jpeg(&self, file: &dyn UploadHandle, jpg_path: &Path) -> ImageResult<()> {
        let image = self.codec.decode_png(file.temp_path())?;

        let directory = jpg_path.parent().unwrap_or_else(|| Path::new("."));
        let staged = NamedTempFile::new_in(directory)?;
        self.codec.encode_jpeg(&image, staged.path())?;
        staged.persist(jpg_path).map_err(|e| ImageError::IoError(e.error))?;
        Ok(())
    }
}

/// Text after the last dot of `name`, or an empty string.
fn extension_of(name: &str) -> &str {
    name.rfind('.').map_or("", |pos| &name[pos + 1..])
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn as_str_list(items: &Option<Vec<String>>) -> Option<Vec<&str>> {
    items
        .as_ref()
        .map(|items| items.iter().map(String::as_str).collect())
}

fn jpg_sibling(directory: &Path, destination: &Path) -> Option<PathBuf> {
    let mut name = OsString::from(destination.file_stem()?);
    name.push(".jpg");
    Some(directory.join(name))
}

fn ensure_directory(directory: &Path) -> Result<(), SaveError> {
    if directory.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(super::constants::DIRECTORY_MODE);
    }

    builder.create(directory).map_err(|source| SaveError::Directory {
        path: directory.to_path_buf(),
        source,
    })
}
