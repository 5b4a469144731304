//! Settings infrastructure for styled-jsx-lsp.
//!
//! Settings are read from a `settings.toml` file found near the workspace
//! root. Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! [validation]
//! enabled = true
//! delay_ms = 200
//!
//! [cache]
//! max_entries = 10
//! max_age_secs = 60
//! cleanup_interval_secs = 60
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::CacheLimits;

const SETTINGS_FILE: &str = "settings.toml";

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub validation: Option<ValidationSettings>,
    pub cache: Option<CacheSettings>,
}

/// Diagnostics publishing.
#[derive(Debug, Default, Deserialize)]
pub struct ValidationSettings {
    /// Whether to publish style-sheet diagnostics at all (default: true).
    pub enabled: Option<bool>,
    /// Delay between the last edit and revalidation (default: 200).
    pub delay_ms: Option<u64>,
}

/// Parsed style-sheet cache limits.
#[derive(Debug, Default, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached style sheets (default: 10).
    pub max_entries: Option<usize>,
    /// Seconds an unused style sheet stays cached (default: 60).
    pub max_age_secs: Option<u64>,
    /// Seconds between sweeps for idle entries (default: 60).
    pub cleanup_interval_secs: Option<u64>,
}

impl Settings {
    pub fn validation_enabled(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.enabled)
            .unwrap_or(true)
    }

    pub fn validation_delay(&self) -> Duration {
        let millis = self
            .validation
            .as_ref()
            .and_then(|v| v.delay_ms)
            .unwrap_or(200);
        Duration::from_millis(millis)
    }

    pub fn cache_limits(&self) -> CacheLimits {
        let defaults = CacheLimits::default();
        let Some(cache) = &self.cache else {
            return defaults;
        };
        CacheLimits {
            max_entries: cache.max_entries.unwrap_or(defaults.max_entries),
            max_age: cache
                .max_age_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_age),
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        let secs = self
            .cache
            .as_ref()
            .and_then(|c| c.cleanup_interval_secs)
            .unwrap_or(60)
            .max(1);
        Duration::from_secs(secs)
    }
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)`. If nothing is found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            debug!("using settings from {}", candidate.display());
            return (load_settings(&candidate), dir.to_path_buf());
        }
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join(SETTINGS_FILE);
                if candidate.is_file() {
                    debug!("using settings from {}", candidate.display());
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
