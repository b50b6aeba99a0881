//! Root module for the validation system.
//! Exposes the public API for upload validation.

mod codec;
mod constants;
mod file_validator;
mod probe;
mod types;
mod upload;

// Re-export commonly used types and functions
pub use codec::{ImageCodec, ImageCrateCodec};
pub use constants::*;
pub use file_validator::FileValidator;
pub use probe::{ContentProbe, ImageProbe};
pub use types::{
    DimensionBounds, DimensionCheck, ImageType, SaveError, ValidationError, ValidationRules,
};
pub use upload::{LocalUpload, UploadHandle};
