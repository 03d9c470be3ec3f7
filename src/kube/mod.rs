//! Minimal typed Kubernetes shapes.
//!
//! Export decodes a replaced manifest into one of these structs so that
//! mistyped or missing fields fail cleanly instead of producing a manifest
//! the API server would reject. Only the fields needed to check structure are
//! typed; everything else rides along in `extra`.

mod bytes;
mod types;

pub use bytes::ByteString;
pub use types::*;
