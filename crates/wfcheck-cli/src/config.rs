//! Settings file for the checker.
//!
//! ```toml
//! [data]
//! dir = "exports"
//!
//! [rules]
//! power_fix_functions = ["power_off", "line_fix", "fix_power", "set_limit"]
//!
//! [selection]
//! farm_type = "W"
//! ```
//!
//! Every section and key is optional; missing values take the built-in
//! defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wfcheck_validate::{FarmSelection, RuleSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the exported tables live.
    pub data: DataSettings,

    /// Allow-lists and tolerances used by the checks.
    pub rules: RuleSet,

    /// Which farms `--active` picks.
    pub selection: FarmSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding one CSV file per table.
    pub dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize settings")
    }

    /// Data directory: command-line flag, then settings file, then the
    /// working directory.
    pub fn data_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.data.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
