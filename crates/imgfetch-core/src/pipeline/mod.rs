//! Fetch, filter, dedup and save: the per-URL loop.
//!
//! URLs are processed one at a time in input order. Every failure is turned
//! into a [`FetchOutcome`] and reported as one status line; nothing aborts the
//! run except a failure to write the status line itself.

mod outcome;
mod seen;

pub use outcome::{FetchOutcome, RunSummary};
pub use seen::SeenHashes;

use crate::checksum::sha256_hex;
use crate::config::FetchConfig;
use crate::fetch::{check_url, CurlClient, HeadDecision, HttpClient, Response, ResponseHead};
use crate::storage::ImageStore;
use crate::url_model::derive_filename;
use anyhow::{Context, Result};
use std::io::Write;

const IMAGE_PREFIX: &str = "image/";

/// True if `content_type` starts with `image/`.
///
/// Deliberately ASCII case-insensitive, so `IMAGE/PNG` is accepted: media
/// types are case-insensitive, unlike a plain `starts_with` check.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..IMAGE_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(IMAGE_PREFIX))
}

fn head_decision(head: &ResponseHead) -> HeadDecision {
    let ct = head.content_type.as_deref().unwrap_or("");
    if head.is_error_status() || !is_image_content_type(ct) {
        HeadDecision::Abort
    } else {
        HeadDecision::Continue
    }
}

/// Processes one URL. Returns `None` for blank input (no status line).
pub fn fetch_one<C: HttpClient + ?Sized>(
    client: &C,
    store: &ImageStore,
    seen: &mut SeenHashes,
    cfg: &FetchConfig,
    url: &str,
) -> Option<FetchOutcome> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(attempt(client, store, seen, cfg, url))
}

fn attempt<C: HttpClient + ?Sized>(
    client: &C,
    store: &ImageStore,
    seen: &mut SeenHashes,
    cfg: &FetchConfig,
    url: &str,
) -> FetchOutcome {
    let response = match check_url(url)
        .and_then(|_| client.get(url, &mut head_decision))
        .and_then(Response::error_for_status)
    {
        Ok(r) => r,
        Err(e) => {
            return FetchOutcome::TransportError {
                message: e.to_string(),
            }
        }
    };

    let content_type = response.head.content_type.clone().unwrap_or_default();
    if !is_image_content_type(&content_type) {
        return FetchOutcome::SkippedNotImage { content_type };
    }

    let body = match response.body {
        Some(b) => b,
        None => {
            return FetchOutcome::OtherError {
                message: "response body was not received".to_string(),
            }
        }
    };

    let hash = sha256_hex(&body);
    if !seen.insert(hash) {
        return FetchOutcome::SkippedDuplicate;
    }

    let filename = derive_filename(url, seen.len(), cfg);
    match store.write_file(&filename, &body) {
        Ok(path) => FetchOutcome::Saved {
            filename,
            path,
            declared_len: response.head.content_length,
        },
        Err(e) => FetchOutcome::OtherError {
            message: format!("{:#}", e),
        },
    }
}

/// Runs every URL through [`fetch_one`], writing one status line per
/// non-empty URL to `out`. `seen` carries dedup state and can be shared
/// across calls to extend a run.
pub fn run<C, I, S, W>(
    urls: I,
    client: &C,
    store: &ImageStore,
    seen: &mut SeenHashes,
    cfg: &FetchConfig,
    out: &mut W,
) -> Result<RunSummary>
where
    C: HttpClient + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write + ?Sized,
{
    let mut summary = RunSummary::default();
    for url in urls {
        let url = url.as_ref().trim();
        let outcome = match fetch_one(client, store, seen, cfg, url) {
            Some(o) => o,
            None => continue,
        };
        log_outcome(url, &outcome);
        writeln!(out, "{}", outcome.status_line(url)).context("write status line")?;
        summary.record(&outcome);
    }
    tracing::info!(%summary, "run finished");
    Ok(summary)
}

/// Fetches `urls` into `cfg.dest_dir` with a [`CurlClient`] and a fresh dedup set.
///
/// Fails only if the destination directory cannot be created or `out` cannot
/// be written.
pub fn fetch_images<I, S, W>(urls: I, cfg: &FetchConfig, out: &mut W) -> Result<RunSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write + ?Sized,
{
    let store = ImageStore::new(&cfg.dest_dir);
    store.ensure_dir()?;
    let client = CurlClient::from_config(cfg);
    let mut seen = SeenHashes::new();
    run(urls, &client, &store, &mut seen, cfg, out)
}

fn log_outcome(url: &str, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Saved { path, .. } => {
            tracing::info!(url, path = %path.display(), "image saved")
        }
        FetchOutcome::SkippedNotImage { content_type } => {
            tracing::info!(url, content_type = %content_type, "skipped: not an image")
        }
        FetchOutcome::SkippedDuplicate => tracing::info!(url, "skipped: duplicate"),
        FetchOutcome::TransportError { message } => {
            tracing::warn!(url, error = %message, "fetch failed")
        }
        FetchOutcome::OtherError { message } => {
            tracing::warn!(url, error = %message, "unexpected error")
        }
    }
}
