use eyre::{Context, Result};
use expanduser::expanduser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cfg::error::{config_load_error, serde_yaml_error};
use crate::complete::CompletionEngine;
use crate::complete::engine::DEFAULT_HELP_WORD;
use crate::complete::tokenizer::DEFAULT_STRIP;
use crate::ports::cache::DEFAULT_CACHE_PATTERN;
use crate::ports::{ClientBinary, GlobCacheStore};

fn default_client() -> String {
    "magnum".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_cache_dir() -> String {
    "~/.magnumclient".to_string()
}

fn default_cache_pattern() -> String {
    DEFAULT_CACHE_PATTERN.to_string()
}

fn default_strip() -> Vec<String> {
    DEFAULT_STRIP.iter().map(|s| s.to_string()).collect()
}

fn default_help_word() -> String {
    DEFAULT_HELP_WORD.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CompleterConfig {
    #[serde(default = "default_client")]
    pub client: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    #[serde(default = "default_cache_pattern")]
    pub cache_pattern: String,

    #[serde(default = "default_strip")]
    pub strip: Vec<String>,

    #[serde(default = "default_help_word")]
    pub help_word: String,
}

impl Default for CompleterConfig {
    fn default() -> Self {
        Self {
            client: default_client(),
            timeout_ms: default_timeout_ms(),
            cache_dir: default_cache_dir(),
            cache_pattern: default_cache_pattern(),
            strip: default_strip(),
            help_word: default_help_word(),
        }
    }
}

/// Command-line and environment overrides, applied on top of the file
#[derive(Clone, Debug, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Config file (default: <config dir>/magnum-complete/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Client binary queried for its vocabulary
    #[arg(long, global = true, env = "MAGNUM_COMPLETE_CLIENT")]
    pub client: Option<String>,

    /// Timeout for the vocabulary query, in milliseconds
    #[arg(long, global = true, env = "MAGNUM_COMPLETE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Directory holding the client's completion cache files
    #[arg(long, global = true, env = "MAGNUM_COMPLETE_CACHE_DIR")]
    pub cache_dir: Option<String>,
}

impl CompleterConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("magnum-complete").join("config.yml"))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(serde_yaml_error)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(config_load_error)?;
        Self::from_yaml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Defaults, then the config file, then overrides.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match &overrides.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(client) = &overrides.client {
            self.client = client.clone();
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(cache_dir) = &overrides.cache_dir {
            self.cache_dir = cache_dir.clone();
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_dir_path(&self) -> Result<PathBuf> {
        Ok(expanduser(&self.cache_dir)?)
    }

    pub fn build_engine(&self) -> Result<CompletionEngine<ClientBinary, GlobCacheStore>> {
        let source = ClientBinary::new(&self.client, self.timeout());
        let cache = GlobCacheStore::new(self.cache_dir_path()?, &self.cache_pattern);
        Ok(CompletionEngine::new(source, cache)
            .with_strip(self.strip.clone())
            .with_help_word(&self.help_word))
    }
}
