//! External capability seams.
//!
//! The kinship-name calculator and the photo resizer are provided by
//! outside collaborators (a linguistic library and the host's imaging
//! stack). The core only depends on these narrow contracts; no
//! implementation lives in this crate.

use anyhow::Result;

/// Resolves a chain of relation labels (e.g. "father", "older-brother")
/// into the proper kinship terms for the giver.
pub trait KinshipResolver {
    fn resolve_kinship_chain(&self, path: &[&str]) -> Result<Vec<String>>;
}

/// Scales an encoded image down to a maximum width, returning a
/// re-encoded blob suitable for storing on a queued item.
pub trait ImageResizer {
    fn resize_to_width(&self, blob: &[u8], max_width: u32) -> Result<Vec<u8>>;
}
