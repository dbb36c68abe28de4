//! Configuration Module
//!
//! Where the backing file lives and how long records live by default.

use std::env;
use std::path::{Path, PathBuf};

use crate::cache::MILLIS_PER_MINUTE;

// == Defaults ==
/// Directory created under the working directory when none is configured.
pub const DEFAULT_CACHE_DIRECTORY: &str = ".satchel-cache";

/// Name of the backing file inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Lifespan applied by `write` and `hydrate` when the caller passes none.
pub const DEFAULT_LIFESPAN_MINUTES: u64 = 15;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the backing file
    pub cache_directory: PathBuf,
    /// Lifespan in minutes for records written without an explicit one
    pub default_lifespan_minutes: u64,
}

impl Config {
    /// Creates a config rooted at `cache_directory` with the default lifespan.
    pub fn new(cache_directory: impl Into<PathBuf>) -> Self {
        Self {
            cache_directory: cache_directory.into(),
            default_lifespan_minutes: DEFAULT_LIFESPAN_MINUTES,
        }
    }

    pub fn with_default_lifespan(mut self, minutes: u64) -> Self {
        self.default_lifespan_minutes = minutes;
        self
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SATCHEL_CACHE_DIR` - Cache directory (default: `<cwd>/.satchel-cache`)
    /// - `SATCHEL_DEFAULT_LIFESPAN_MINUTES` - Default lifespan (default: 15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_directory: env::var_os("SATCHEL_CACHE_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_directory),
            default_lifespan_minutes: env::var("SATCHEL_DEFAULT_LIFESPAN_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_lifespan_minutes),
        }
    }

    /// Full path of the backing file.
    pub fn cache_file_path(&self) -> PathBuf {
        self.cache_directory.join(CACHE_FILE_NAME)
    }

    /// The default lifespan in the unit `compute_expiry` expects.
    pub fn default_lifespan_ms(&self) -> u128 {
        u128::from(self.default_lifespan_minutes) * MILLIS_PER_MINUTE
    }
}

impl Default for Config {
    fn default() -> Self {
        let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(default_directory_in(&base))
    }
}

fn default_directory_in(base: &Path) -> PathBuf {
    base.join(DEFAULT_CACHE_DIRECTORY)
}
