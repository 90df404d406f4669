//! Custom extractors.

pub mod json_payload;

pub use json_payload::JsonPayload;
