//! Type definitions for the validation system

mod image_type;
mod outcome;
mod rules;

// Re-export commonly used types
pub use image_type::ImageType;
pub use outcome::{DimensionBounds, DimensionCheck, SaveError, ValidationError};
pub use rules::ValidationRules;
