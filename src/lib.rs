//! Validation and persistence of single uploaded files.
//!
//! The [`FileValidator`] checks an upload's size, extension, MIME type and,
//! for images, format and pixel dimensions, then saves it with optional PNG
//! to JPEG conversion. The [`backend`] module exposes the same checks over
//! HTTP.

pub mod backend;
pub mod config;
pub mod consts;
pub mod utils;

pub use utils::validation::{
    DimensionBounds, DimensionCheck, FileValidator, ImageType, LocalUpload, SaveError,
    UploadHandle, ValidationError, ValidationRules,
};
