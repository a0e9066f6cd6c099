// Application configuration.
// Built once at startup and passed by ownership into the cache; immutable after.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{HubdeckError, Result};

/// How long a cache entry stays fresh: 30 minutes.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Placeholder for owner/repo on operations that are not repo-scoped.
pub const PLACEHOLDER: &str = "default";

/// Cache directories and log locations, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base cache directory (~/.cache/hubdeck unless overridden).
    pub base_dir: PathBuf,
    /// Directory holding one file per cache key.
    pub data_dir: PathBuf,
    /// Append-only cache event log.
    pub cache_log: PathBuf,
    /// Fetch failure log, overwritten on each failure.
    pub fetch_log: PathBuf,
    /// Entry freshness window.
    pub ttl: Duration,
}

impl Config {
    /// Resolve the base directory from HUBDECK_CACHE_DIR, falling back to
    /// the per-user cache directory.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var_os("HUBDECK_CACHE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("", "", "hubdeck")
                .map(|dirs| dirs.cache_dir().to_path_buf())
                .ok_or_else(|| {
                    HubdeckError::Other("could not determine a home directory".to_string())
                })?,
        };
        Ok(Self::at(base))
    }

    /// Build a config rooted at an explicit base directory.
    pub fn at(base_dir: PathBuf) -> Self {
        let data_dir = base_dir.join("data");
        let cache_log = base_dir.join("cache.log");
        let fetch_log = base_dir.join("fetch_failure.log");
        Self {
            base_dir,
            data_dir,
            cache_log,
            fetch_log,
            ttl: CACHE_TTL,
        }
    }

    /// Create the base and data directories if they do not exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(HubdeckError::Storage)?;
        Ok(())
    }
}
