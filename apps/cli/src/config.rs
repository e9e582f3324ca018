//! Diary configuration loaded from YAML.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "diary.yaml";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiaryConfig {
    /// Campaign save file.
    pub database: PathBuf,
    /// Base path for rendered trees; single-scenario trees append `-{id}`.
    pub tree_output: PathBuf,
    /// Output format handed to the layout command, e.g. "pdf" or "svg".
    pub tree_format: String,
    /// Hop limit for single-scenario trees, `null` for unlimited.
    pub max_hops: Option<usize>,
    /// Number of scenarios in the campaign book.
    pub scenario_count: usize,
    /// Graphviz executable, `null` to only write DOT source.
    pub layout_command: Option<String>,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(persistence::default_database_path()),
            tree_output: PathBuf::from("render/scenario-tree.gv"),
            tree_format: "pdf".to_string(),
            max_hops: Some(3),
            scenario_count: 95,
            layout_command: Some("dot".to_string()),
        }
    }
}

impl DiaryConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid diary configuration")
    }

    /// Load the given file, or `diary.yaml` if present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_yaml(&text)
    }
}
