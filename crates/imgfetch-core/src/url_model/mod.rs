//! URL modeling and filename derivation.
//!
//! Filenames come from the last URL path segment, with a generated
//! `image_{n}.{ext}` fallback. Sanitization is opt-in (`sanitize_filenames`).

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

use crate::config::FetchConfig;

/// Generated name for images whose URL has no usable path segment.
pub fn fallback_filename(ordinal: usize, extension: &str) -> String {
    format!("image_{}.{}", ordinal, extension)
}

/// Derives the filename for saving an image fetched from `url`.
///
/// `ordinal` is the number of unique images seen so far in this run
/// (including this one) and is only used for the fallback name. When
/// `cfg.sanitize_filenames` is off the path segment is used verbatim.
///
/// # Examples
///
/// - `https://x.test/pic.png` → `"pic.png"`
/// - `https://example.com/gallery/` with ordinal 1 → `"image_1.jpg"`
pub fn derive_filename(url: &str, ordinal: usize, cfg: &FetchConfig) -> String {
    let candidate = filename_from_url_path(url).map(|name| {
        if cfg.sanitize_filenames {
            sanitize_filename_for_linux(&name)
        } else {
            name
        }
    });

    match candidate {
        Some(name) if !name.is_empty() => name,
        _ => fallback_filename(ordinal, &cfg.fallback_extension),
    }
}
