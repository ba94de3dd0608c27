//! CLI for imgfetch.

mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use imgfetch_core::config::{self, FetchConfig};
use imgfetch_core::pipeline::{self, RunSummary};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub use prompt::{read_urls, split_urls};

const BANNER: &str = "Welcome to the Ubuntu Image Fetcher\n\
A mindful tool for safely collecting images from the web\n";
const FAREWELL: &str = "\nConnection strengthened. Community enriched. 🌍";

/// Fetch images from URLs, skipping non-images and duplicates.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(
    about = "Fetch images from URLs into a local folder, skipping non-images and duplicates",
    long_about = None
)]
pub struct Cli {
    /// Image URLs; each argument may hold a comma-separated list. Prompts on stdin when omitted.
    pub urls: Vec<String>,

    /// Directory to save images into (overrides config; default "Fetched_Images").
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config; default 10).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Replace path separators and control characters in URL-derived filenames.
    #[arg(long)]
    pub sanitize: bool,

    /// Read configuration from this file instead of ~/.config/imgfetch/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    /// Loads config and applies command-line overrides on top.
    pub fn resolve_config(&self) -> Result<FetchConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut FetchConfig) {
        if let Some(dest) = &self.dest {
            cfg.dest_dir = dest.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        if self.sanitize {
            cfg.sanitize_filenames = true;
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.resolve_config()?;
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_session(&cfg, &mut stdin.lock(), &mut stdout.lock())?;
        Ok(())
    }

    /// Banner, URLs (from args or one prompted line), status lines, farewell.
    pub fn run_session<R: BufRead + ?Sized, W: Write + ?Sized>(
        &self,
        cfg: &FetchConfig,
        input: &mut R,
        out: &mut W,
    ) -> Result<RunSummary> {
        writeln!(out, "{}", BANNER)?;
        let urls = if self.urls.is_empty() {
            read_urls(input, out)?
        } else {
            split_urls(&self.urls)
        };

        let summary = pipeline::fetch_images(&urls, cfg, out)
            .with_context(|| format!("fetching into {}", cfg.dest_dir.display()))?;
        tracing::info!("imgfetch finished: {}", summary);

        writeln!(out, "{}", FAREWELL)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests;
