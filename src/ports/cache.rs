//! Per-user completion cache files.
//!
//! The client writes previously seen resource names (cluster names, template
//! names, ...) to files under its config directory. They are read-only here
//! and every failure collapses to "no tokens".

use eyre::{Context, Result};
use std::path::PathBuf;

/// Default glob under the cache directory
pub const DEFAULT_CACHE_PATTERN: &str = "*/*-cache";

/// Source of dynamic completion values
pub trait CacheStore: Send + Sync {
    /// Whitespace-separated tokens from every cache file, in file order
    fn read_tokens(&self) -> Vec<String>;
}

/// Reads every file matching `<dir>/<pattern>`
#[derive(Debug, Clone)]
pub struct GlobCacheStore {
    dir: PathBuf,
    pattern: String,
}

impl GlobCacheStore {
    pub fn new(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    /// Matching cache files in sorted order
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let escaped = glob::Pattern::escape(&self.dir.to_string_lossy());
        let full = format!("{}/{}", escaped.trim_end_matches('/'), self.pattern);
        let mut files: Vec<PathBuf> = glob::glob(&full)
            .with_context(|| format!("Invalid cache pattern '{full}'"))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }
}

impl CacheStore for GlobCacheStore {
    fn read_tokens(&self) -> Vec<String> {
        let files = match self.files() {
            Ok(files) => files,
            Err(e) => {
                log::debug!("Skipping completion cache: {e}");
                return Vec::new();
            }
        };

        let mut tokens = Vec::new();
        for path in files {
            match std::fs::read_to_string(&path) {
                Ok(contents) => tokens.extend(contents.split_whitespace().map(String::from)),
                Err(e) => log::debug!("Unreadable cache file {}: {}", path.display(), e),
            }
        }
        tokens
    }
}

/// In-memory cache for tests
#[derive(Debug, Clone, Default)]
pub struct MemCache {
    tokens: Vec<String>,
}

impl MemCache {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CacheStore for MemCache {
    fn read_tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }
}
