//! Parse HTTP response header lines into ResponseHead.

use super::ResponseHead;

/// Parse collected header lines (status line included) into ResponseHead.
///
/// A status line (`HTTP/...`) resets everything seen before it, so when the
/// lines of a redirect chain are passed in, only the last response counts.
pub fn parse_head(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead {
                status: line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|code| code.parse::<u32>().ok())
                    .unwrap_or(0),
                ..Default::default()
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                head.content_length = value.parse::<u64>().ok();
            }
        }
    }

    head
}
