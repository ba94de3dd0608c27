//! HTTP GET with header inspection before the body is committed.
//!
//! The pipeline talks to an [`HttpClient`]; the production implementation is
//! [`CurlClient`] (libcurl via the `curl` crate). Callers get a look at the
//! final response head through `on_head` and can abort the transfer before
//! the body is downloaded.

mod client;
mod parse;

pub use client::CurlClient;
pub use parse::parse_head;

use thiserror::Error;

/// Status line and the headers the pipeline cares about, from the final response
/// (after redirects).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// HTTP status code; 0 if no status line was seen.
    pub status: u32,
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    /// `Content-Length` if present and numeric. This is the declared size, not the bytes received.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    /// True for 4xx and 5xx responses.
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// What to do with the body after seeing the response head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadDecision {
    Continue,
    Abort,
}

/// Outcome of a GET that reached the server.
#[derive(Debug, Clone)]
pub struct Response {
    pub head: ResponseHead,
    /// Full body, or `None` when `on_head` aborted the transfer.
    pub body: Option<Vec<u8>>,
}

impl Response {
    /// Turns 4xx/5xx responses into [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.head.is_error_status() {
            Err(FetchError::Status(self.head.status))
        } else {
            Ok(self)
        }
    }
}

/// Failure to complete a request: bad URL, network level or HTTP error status.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL does not parse or is not http/https. Never handed to libcurl,
    /// which would otherwise guess a scheme for input like `host/pic.png`.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// DNS, connect, TLS, timeout or other libcurl failure.
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Server answered with a 4xx/5xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

/// Accepts only absolute `http://` and `https://` URLs.
pub fn check_url(url: &str) -> Result<url::Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Blocking HTTP GET seam used by the pipeline.
pub trait HttpClient {
    /// GET `url`. `on_head` is called exactly once with the final response head,
    /// before any body bytes are kept.
    fn get(
        &self,
        url: &str,
        on_head: &mut dyn FnMut(&ResponseHead) -> HeadDecision,
    ) -> Result<Response, FetchError>;
}
