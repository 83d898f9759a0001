//! Tunables for the search pipeline, loaded from a TOML file under the user
//! config directory and overridden by CLI flags. All values are threaded
//! through the pipeline explicitly; nothing here is global state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::scanner::MAX_DEPTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum score a candidate must reach during segmented search.
    pub score_threshold: f64,
    /// Disable confidence pruning, the final depth penalty, and the relative
    /// band; also forces the threshold to 0.
    pub show_all_matches: bool,
    /// Always choose the top-ranked survivor instead of asking the selector.
    pub always_first_match: bool,
    /// Recursion depth for every directory scan.
    pub max_depth: usize,
    /// Command used to resolve an ambiguous result, run via `sh -c`.
    pub selector_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_threshold: 0.0,
            show_all_matches: false,
            always_first_match: false,
            max_depth: MAX_DEPTH,
            selector_command: "fzf".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the default config file, falling back to defaults
    /// when the file does not exist. A malformed file is a hard error.
    pub fn load() -> Result<Self> {
        match config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("invalid configuration: cannot read {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Threshold actually applied by segmented search.
    pub fn effective_threshold(&self) -> f64 {
        if self.show_all_matches {
            0.0
        } else {
            self.score_threshold
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "fcd", "fcd").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Location of the global ignore file consulted by every scan root.
pub fn global_ignore_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("ignore"))
}
