//! Generic error messages returned by the HTTP front. Validation failures
//! carry their own message instead.

pub const UPLOAD_FAILED: &str = "Upload failed";

pub const MALFORMED_UPLOAD: &str = "Malformed upload";
