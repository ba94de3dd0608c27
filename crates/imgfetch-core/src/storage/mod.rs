//! Destination directory and image file writes.
//!
//! Each image is written to a short-named temp file in the destination
//! directory and renamed over the final path, replacing any existing file of
//! that name. The temp name never depends on the image name, so any name the
//! filesystem accepts can be written.

mod writer;

pub use writer::ImageStore;
