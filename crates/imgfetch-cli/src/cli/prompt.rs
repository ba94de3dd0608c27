//! Interactive URL prompt and comma-separated list splitting.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const PROMPT: &str = "Enter one or more image URLs (comma-separated): ";

/// Splits each argument on commas. Pieces are kept as-is; the pipeline trims
/// them and ignores blanks.
pub fn split_urls<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|a| a.as_ref().split(','))
        .map(str::to_string)
        .collect()
}

/// Writes the prompt and reads one line of comma-separated URLs.
/// End of input yields an empty list.
pub fn read_urls<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    out: &mut W,
) -> Result<Vec<String>> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("read URLs from stdin")?;
    if n == 0 {
        return Ok(Vec::new());
    }
    Ok(split_urls(&[line]))
}
