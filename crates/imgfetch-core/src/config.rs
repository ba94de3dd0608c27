use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Destination directory used when neither config nor CLI overrides it.
pub const DEFAULT_DEST_DIR: &str = "Fetched_Images";

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Directory images are saved into, relative to the working directory unless absolute.
    pub dest_dir: PathBuf,
    /// Total time allowed for one HTTP request (connect + headers + body), in seconds.
    pub timeout_secs: u64,
    /// Extension for generated `image_{n}` names when the URL has no usable path segment.
    pub fallback_extension: String,
    /// Replace path separators and control chars in URL-derived filenames. Off by default.
    #[serde(default)]
    pub sanitize_filenames: bool,
    /// Maximum number of redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Optional User-Agent header; libcurl sends none when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_max_redirects() -> u32 {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            timeout_secs: 10,
            fallback_extension: "jpg".to_string(),
            sanitize_filenames: false,
            max_redirects: default_max_redirects(),
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but with an explicit path (tests, alternate profiles).
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
