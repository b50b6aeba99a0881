//! Constants used throughout the validation system

/// Number of bytes in a megabyte, used when reporting size limits
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Default maximum allowed file size (1MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1 * BYTES_PER_MEGABYTE;

/// Default maximum allowed image dimensions
pub const DEFAULT_MAX_IMAGE_DIMENSIONS: (u32, u32) = (4096, 4096);

/// Extensions accepted by the default image rule set
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Quality used when re-encoding PNG uploads as JPEG
pub const JPEG_QUALITY: u8 = 75;

/// Permissions of directories created while saving uploads
pub const DIRECTORY_MODE: u32 = 0o755;
