//! Cache configuration
//!
//! Layered, lowest priority first: built-in defaults, an optional TOML file,
//! environment variables, then whatever the caller sets explicitly.
//!
//! ```toml
//! cache_dir = "/var/cache/mc-artifacts"
//! http_timeout_secs = 60
//!
//! [urls]
//! version_manifest = "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json"
//!
//! [tools]
//! burger_install = ["pip", "install", "--user", "six", "jawa"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";
pub const DEFAULT_YARN_VERSIONS_URL: &str = "https://meta.fabricmc.net/v2/versions/yarn";
pub const DEFAULT_BURGER_REPO: &str = "https://github.com/pokechu22/Burger";
pub const DEFAULT_GENERATOR_REPO: &str = "https://github.com/u9g/minecraft-data-generator-server";

/// Environment variable overriding the cache root
pub const CACHE_DIR_ENV: &str = "MC_ARTIFACTS_CACHE_DIR";
/// Environment variable overriding the HTTP timeout (seconds)
pub const HTTP_TIMEOUT_ENV: &str = "MC_ARTIFACTS_HTTP_TIMEOUT";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const MIN_HTTP_TIMEOUT_SECS: u64 = 5;
const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

/// Everything an [`ArtifactCache`](crate::ArtifactCache) needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_root: PathBuf,
    pub version_manifest_url: String,
    pub yarn_versions_url: String,
    pub burger_repo_url: String,
    pub generator_repo_url: String,
    /// Run inside the Burger checkout right after it is cloned
    pub burger_install: Vec<String>,
    pub http_timeout: Duration,
}

impl Config {
    /// Defaults rooted at `cache_root`.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            version_manifest_url: DEFAULT_VERSION_MANIFEST_URL.to_string(),
            yarn_versions_url: DEFAULT_YARN_VERSIONS_URL.to_string(),
            burger_repo_url: DEFAULT_BURGER_REPO.to_string(),
            generator_repo_url: DEFAULT_GENERATOR_REPO.to_string(),
            burger_install: ["pip", "install", "six", "jawa"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Defaults, then the TOML file at `path` (if given), then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::new(default_cache_root());
        if let Some(path) = path {
            let file = ConfigToml::read(path)?;
            config.apply(file);
        }
        config.apply_env();
        Ok(config)
    }

    fn apply(&mut self, file: ConfigToml) {
        if let Some(dir) = file.cache_dir {
            self.cache_root = dir;
        }
        if let Some(secs) = file.http_timeout_secs {
            self.http_timeout = clamp_timeout(secs);
        }
        if let Some(urls) = file.urls {
            if let Some(url) = urls.version_manifest {
                self.version_manifest_url = url;
            }
            if let Some(url) = urls.yarn_versions {
                self.yarn_versions_url = url;
            }
        }
        if let Some(tools) = file.tools {
            if let Some(url) = tools.burger {
                self.burger_repo_url = url;
            }
            if let Some(url) = tools.generator {
                self.generator_repo_url = url;
            }
            if let Some(cmd) = tools.burger_install {
                self.burger_install = cmd;
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV)
            && !dir.is_empty()
        {
            self.cache_root = PathBuf::from(dir);
        }
        if let Some(secs) = std::env::var(HTTP_TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout = clamp_timeout(secs);
        }
    }
}

fn clamp_timeout(secs: u64) -> Duration {
    Duration::from_secs(secs.clamp(MIN_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS))
}

/// `$XDG_CACHE_HOME/mc-artifacts`, or `./downloads` when there is no cache dir
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("mc-artifacts"))
        .unwrap_or_else(|| PathBuf::from("downloads"))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    cache_dir: Option<PathBuf>,
    http_timeout_secs: Option<u64>,
    urls: Option<UrlsToml>,
    tools: Option<ToolsToml>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct UrlsToml {
    version_manifest: Option<String>,
    yarn_versions: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ToolsToml {
    burger: Option<String>,
    generator: Option<String>,
    burger_install: Option<Vec<String>>,
}

impl ConfigToml {
    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
