//! Outcomes of validation and save operations.
//!
//! Validation failures are plain values whose `Display` is the message shown
//! to the user; the wording is fixed and callers compare against it. Save
//! failures are operational errors and carry their cause.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The first rule an upload broke. Checks stop at the first failure, so at
/// most one of these is ever reported per call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please choose the file to upload.")]
    NoFile,
    #[error("{name} is too large! Please upload files up to {max_megabytes}MB.")]
    TooLarge { name: String, max_megabytes: u64 },
    #[error("Only files with [{}] extensions are supported.", .allowed.join(", "))]
    Extension { allowed: Vec<String> },
    #[error("Only files with type [{}] are supported.", .allowed.join(", "))]
    MimeType { allowed: Vec<String> },
    #[error("Unsupported image type.")]
    ImageType,
    #[error("Maximum image width is {0}px.")]
    MaxWidth(u32),
    #[error("Maximum image height is {0}px.")]
    MaxHeight(u32),
    #[error("Minimum image width is {0}px.")]
    MinWidth(u32),
    #[error("Minimum image height is {0}px.")]
    MinHeight(u32),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Destination path cannot be empty.")]
    EmptyPath,
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Directory not found: {}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No uploaded file to save.")]
    NoFile,
}

impl SaveError {
    /// Whether the caller passed a destination that can never be written.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyPath | Self::AlreadyExists(_))
    }
}

/// Result of a dimension check. Constraints are tested in declaration order
/// and only the first violated one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DimensionCheck {
    Ok = 0,
    TooWide = 1,
    TooTall = 2,
    TooNarrow = 3,
    TooShort = 4,
}

impl DimensionCheck {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Optional pixel bounds for an image; `None` leaves a side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionBounds {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
}

impl DimensionBounds {
    /// Bounds of zero are treated as "not given" when deciding whether to
    /// inspect the image at all.
    pub fn any_positive(&self) -> bool {
        [self.max_width, self.max_height, self.min_width, self.min_height]
            .iter()
            .any(|bound| bound.is_some_and(|value| value > 0))
    }
}
