//! Per-URL outcome and run summary.

use std::fmt;
use std::path::PathBuf;

/// What happened to one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Image written to `path`. `declared_len` is the `Content-Length` header, if any.
    Saved {
        filename: String,
        path: PathBuf,
        declared_len: Option<u64>,
    },
    /// Response was not `image/*`; body not downloaded.
    SkippedNotImage { content_type: String },
    /// Same bytes as an image already saved in this run.
    SkippedDuplicate,
    /// Network failure or 4xx/5xx status.
    TransportError { message: String },
    /// Anything else (e.g. the file write failed).
    OtherError { message: String },
}

impl FetchOutcome {
    /// Human-readable status line for `url`.
    pub fn status_line(&self, url: &str) -> String {
        match self {
            FetchOutcome::Saved {
                filename,
                path,
                declared_len,
            } => {
                let len = declared_len
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                format!("✓ Downloaded {} ({} bytes) → {}", filename, len, path.display())
            }
            FetchOutcome::SkippedNotImage { content_type } => format!(
                "✗ Skipping {} — not an image (Content-Type: {})",
                url, content_type
            ),
            FetchOutcome::SkippedDuplicate => {
                format!("✗ Skipping {} — duplicate image detected", url)
            }
            FetchOutcome::TransportError { message } => {
                format!("✗ Connection error fetching {}: {}", url, message)
            }
            FetchOutcome::OtherError { message } => {
                format!("✗ Unexpected error with {}: {}", url, message)
            }
        }
    }
}

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub not_image: usize,
    pub duplicates: usize,
    pub transport_errors: usize,
    pub other_errors: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Saved { .. } => self.saved += 1,
            FetchOutcome::SkippedNotImage { .. } => self.not_image += 1,
            FetchOutcome::SkippedDuplicate => self.duplicates += 1,
            FetchOutcome::TransportError { .. } => self.transport_errors += 1,
            FetchOutcome::OtherError { .. } => self.other_errors += 1,
        }
    }

    /// Number of non-empty URLs processed.
    pub fn total(&self) -> usize {
        self.saved + self.not_image + self.duplicates + self.transport_errors + self.other_errors
    }

    pub fn failures(&self) -> usize {
        self.transport_errors + self.other_errors
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} saved, {} not an image, {} duplicate, {} failed",
            self.saved,
            self.not_image,
            self.duplicates,
            self.failures()
        )
    }
}
