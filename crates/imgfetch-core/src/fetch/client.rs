//! libcurl-backed [`HttpClient`].

use super::{check_url, parse_head, FetchError, HeadDecision, HttpClient, Response, ResponseHead};
use crate::config::FetchConfig;
use std::cell::RefCell;
use std::str;
use std::time::Duration;

/// Blocking GET client. One Easy handle per request; follows redirects and
/// bounds the whole transfer by `timeout`.
#[derive(Debug, Clone)]
pub struct CurlClient {
    timeout: Duration,
    max_redirects: u32,
    user_agent: Option<String>,
}

impl CurlClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_redirects: 10,
            user_agent: None,
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            timeout: cfg.timeout(),
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HttpClient for CurlClient {
    fn get(
        &self,
        url: &str,
        on_head: &mut dyn FnMut(&ResponseHead) -> HeadDecision,
    ) -> Result<Response, FetchError> {
        check_url(url)?;

        let header_lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let mut head: Option<ResponseHead> = None;
        let mut decision: Option<HeadDecision> = None;
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.borrow_mut().push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if decision.is_none() {
                    let h = parse_head(&header_lines.borrow());
                    decision = Some(on_head(&h));
                    head = Some(h);
                }
                match decision {
                    Some(HeadDecision::Continue) => {
                        body.extend_from_slice(data);
                        Ok(data.len())
                    }
                    // Returning short makes libcurl stop with a write error.
                    _ => Ok(0),
                }
            })?;
            transfer.perform()
        };

        let aborted = decision == Some(HeadDecision::Abort);
        match performed {
            Ok(()) => {}
            Err(e) if aborted && e.is_write_error() => {
                tracing::debug!(url, "transfer aborted after response head");
            }
            Err(e) => return Err(FetchError::Transport(e)),
        }

        // Empty bodies never reach the write callback.
        let head = match head {
            Some(h) => h,
            None => {
                let mut h = parse_head(&header_lines.borrow());
                if h.status == 0 {
                    h.status = easy.response_code()?;
                }
                decision = Some(on_head(&h));
                h
            }
        };

        let body = match decision {
            Some(HeadDecision::Continue) => Some(body),
            _ => None,
        };
        Ok(Response { head, body })
    }
}
