//! Utilities shared by the library and the HTTP front.

pub mod error_messages;
pub mod validation;
