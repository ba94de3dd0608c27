//! Filename extraction from URL path.

/// Extracts the last path segment from a URL for use as a filename.
///
/// Works on the text as given, not on a re-serialized URL, so spaces and
/// non-ASCII characters survive and percent-escapes are not decoded. The
/// query, fragment and any `;params` on the last segment are dropped. A URL
/// ending in `/` (or with an empty path) yields `None`. Input without
/// `scheme://` is treated as a bare path.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let url = url.trim();
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let url = &url[..end];

    let path = match url.find("://") {
        Some(i) => {
            let after_scheme = &url[i + 3..];
            match after_scheme.find('/') {
                Some(j) => &after_scheme[j..],
                None => "",
            }
        }
        None => url,
    };

    let segment = path.rsplit('/').next().unwrap_or("");
    let segment = segment.split(';').next().unwrap_or("");
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
