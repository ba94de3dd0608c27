//! Integration test: local HTTP server, real libcurl client, files on disk.

mod common;

use common::image_server::{self, Route};
use imgfetch_core::config::FetchConfig;
use imgfetch_core::fetch::{CurlClient, HeadDecision, HttpClient, ResponseHead};
use imgfetch_core::pipeline::{self, SeenHashes};
use imgfetch_core::storage::ImageStore;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png-payload";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg-payload";

fn serve() -> String {
    image_server::start(vec![
        ("/pic.png", Route::ok("image/png", PNG)),
        ("/pic-copy.png", Route::ok("image/png", PNG)),
        ("/page.html", Route::ok("text/html", b"<html>hello</html>")),
        ("/gallery/", Route::ok("image/jpeg", JPEG).without_length()),
        ("/moved", Route::redirect("/landed.jpg")),
        ("/landed.jpg", Route::ok("image/jpeg", b"landed")),
        ("/empty.gif", Route::ok("image/gif", b"")),
        ("/broken.png", Route::status("500 Internal Server Error")),
    ])
}

fn refused_url() -> String {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}/nothing.png", port)
}

fn run_urls(urls: &[String]) -> (tempfile::TempDir, FetchConfig, Vec<String>, pipeline::RunSummary) {
    let dir = tempdir().unwrap();
    let cfg = FetchConfig {
        dest_dir: dir.path().join("Fetched_Images"),
        timeout_secs: 5,
        ..FetchConfig::default()
    };
    let mut out: Vec<u8> = Vec::new();
    let summary = pipeline::fetch_images(urls, &cfg, &mut out).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (dir, cfg, lines, summary)
}

#[test]
fn end_to_end_filters_dedups_and_saves() {
    let base = serve();
    let urls = vec![
        format!("{}/pic.png", base),
        format!("{}/pic-copy.png", base),
        "   ".to_string(),
        format!("{}/page.html", base),
        format!("{}/gallery/", base),
        format!("{}/missing.png", base),
        refused_url(),
    ];
    let (_dir, cfg, lines, summary) = run_urls(&urls);

    assert_eq!(lines.len(), 6, "one line per non-empty URL: {:?}", lines);
    assert!(lines[0].starts_with(&format!("✓ Downloaded pic.png ({} bytes) → ", PNG.len())));
    assert_eq!(
        lines[1],
        format!("✗ Skipping {}/pic-copy.png — duplicate image detected", base)
    );
    assert_eq!(
        lines[2],
        format!(
            "✗ Skipping {}/page.html — not an image (Content-Type: text/html)",
            base
        )
    );
    assert!(lines[3].starts_with("✓ Downloaded image_2.jpg (Unknown bytes) → "));
    assert_eq!(
        lines[4],
        format!("✗ Connection error fetching {}/missing.png: HTTP 404", base)
    );
    assert!(lines[5].starts_with(&format!("✗ Connection error fetching {}: ", urls[6])));

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.not_image, 1);
    assert_eq!(summary.transport_errors, 2);

    let mut names: Vec<String> = fs::read_dir(&cfg.dest_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["image_2.jpg".to_string(), "pic.png".to_string()]);
    assert_eq!(fs::read(cfg.dest_dir.join("pic.png")).unwrap(), PNG);
    assert_eq!(fs::read(cfg.dest_dir.join("image_2.jpg")).unwrap(), JPEG);
}

#[test]
fn gallery_first_is_image_1() {
    let base = serve();
    let (_dir, cfg, lines, _) = run_urls(&[format!("{}/gallery/", base)]);
    assert!(lines[0].starts_with("✓ Downloaded image_1.jpg"));
    assert!(cfg.dest_dir.join("image_1.jpg").exists());
}

#[test]
fn redirect_is_followed_and_named_from_request_url() {
    let base = serve();
    let (_dir, cfg, lines, summary) = run_urls(&[format!("{}/moved", base)]);
    assert_eq!(summary.saved, 1, "{:?}", lines);
    assert_eq!(fs::read(cfg.dest_dir.join("moved")).unwrap(), b"landed");
}

#[test]
fn server_error_and_empty_image() {
    let base = serve();
    let (_dir, cfg, lines, summary) = run_urls(&[
        format!("{}/broken.png", base),
        format!("{}/empty.gif", base),
    ]);
    assert_eq!(
        lines[0],
        format!("✗ Connection error fetching {}/broken.png: HTTP 500", base)
    );
    assert!(lines[1].starts_with("✓ Downloaded empty.gif (0 bytes)"));
    assert_eq!(summary.saved, 1);
    assert_eq!(fs::read(cfg.dest_dir.join("empty.gif")).unwrap(), b"");
}

#[test]
fn curl_client_aborts_on_head() {
    let base = serve();
    let client = CurlClient::new(Duration::from_secs(5));
    let mut seen_head: Option<ResponseHead> = None;
    let resp = client
        .get(&format!("{}/page.html", base), &mut |h: &ResponseHead| {
            seen_head = Some(h.clone());
            HeadDecision::Abort
        })
        .unwrap();
    assert!(resp.body.is_none());
    let head = seen_head.expect("head callback ran");
    assert_eq!(head.status, 200);
    assert_eq!(head.content_type.as_deref(), Some("text/html"));
    assert_eq!(head.content_length, Some(18));
}

#[test]
fn explicit_seen_set_spans_calls() {
    let base = serve();
    let dir = tempdir().unwrap();
    let cfg = FetchConfig {
        dest_dir: dir.path().to_path_buf(),
        ..FetchConfig::default()
    };
    let store = ImageStore::new(&cfg.dest_dir);
    let client = CurlClient::from_config(&cfg);
    let mut seen = SeenHashes::new();
    let mut out = Vec::new();

    pipeline::run(
        [format!("{}/pic.png", base)],
        &client,
        &store,
        &mut seen,
        &cfg,
        &mut out,
    )
    .unwrap();
    let summary = pipeline::run(
        [format!("{}/pic-copy.png", base)],
        &client,
        &store,
        &mut seen,
        &cfg,
        &mut out,
    )
    .unwrap();
    assert_eq!(summary.duplicates, 1);
    assert_eq!(seen.len(), 1);
}
