//! Configuration file for a project folder
//!
//! The config file normally sits in the project folder itself; relative
//! paths inside it resolve against the directory that holds it.

use crate::error::{Result, ScoutError};
use crate::number_log::LogLayout;
use crate::parser::{DEFAULT_NR_PATTERN, DEFAULT_REV_PATTERN};
use crate::scanner::ScanOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocscoutConfig {
    /// Path to the number log workbook
    #[serde(default = "default_number_log")]
    pub number_log: String,

    /// Project number; read from `project_number_cell` when unset or empty
    #[serde(default)]
    pub project_number: Option<String>,

    /// Project title; read from `project_title_cell` when unset or empty
    #[serde(default)]
    pub project_title: Option<String>,

    #[serde(default = "default_project_number_cell")]
    pub project_number_cell: String,

    #[serde(default = "default_project_title_cell")]
    pub project_title_cell: String,

    /// First data row of the number log, 1-based
    #[serde(default = "default_start_row")]
    pub start_row: u32,

    #[serde(default = "default_title_col")]
    pub title_col: String,

    #[serde(default = "default_docnr_col")]
    pub docnr_col: String,

    #[serde(default = "default_nr_pattern")]
    pub nr_pattern: String,

    /// Must contain exactly one capturing group
    #[serde(default = "default_rev_pattern")]
    pub rev_pattern: String,

    /// Directory names excluded from the walk, with everything below them
    #[serde(default = "default_subdirs_to_skip")]
    pub subdirs_to_skip: Vec<String>,

    /// Folder to scan; defaults to the directory holding the config file
    #[serde(default)]
    pub root_dir: Option<String>,
}

fn default_number_log() -> String {
    "number_log.xlsx".to_string()
}

fn default_project_number_cell() -> String {
    "C1".to_string()
}

fn default_project_title_cell() -> String {
    "C2".to_string()
}

fn default_start_row() -> u32 {
    5
}

fn default_title_col() -> String {
    "B".to_string()
}

fn default_docnr_col() -> String {
    "C".to_string()
}

fn default_nr_pattern() -> String {
    DEFAULT_NR_PATTERN.to_string()
}

fn default_rev_pattern() -> String {
    DEFAULT_REV_PATTERN.to_string()
}

fn default_subdirs_to_skip() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for DocscoutConfig {
    fn default() -> Self {
        Self {
            number_log: default_number_log(),
            project_number: None,
            project_title: None,
            project_number_cell: default_project_number_cell(),
            project_title_cell: default_project_title_cell(),
            start_row: default_start_row(),
            title_col: default_title_col(),
            docnr_col: default_docnr_col(),
            nr_pattern: default_nr_pattern(),
            rev_pattern: default_rev_pattern(),
            subdirs_to_skip: default_subdirs_to_skip(),
            root_dir: None,
        }
    }
}

impl DocscoutConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScoutError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    pub fn layout(&self) -> LogLayout {
        LogLayout {
            project_number_cell: self.project_number_cell.clone(),
            project_title_cell: self.project_title_cell.clone(),
            start_row: self.start_row,
            docnr_col: self.docnr_col.clone(),
            title_col: self.title_col.clone(),
        }
    }

    /// Scan options with paths resolved against `base_dir`, the directory
    /// holding the config file.
    pub fn scan_options(&self, base_dir: &Path) -> ScanOptions {
        let root_dir = match self.root_dir.as_deref() {
            Some(dir) if !dir.is_empty() => resolve(base_dir, dir),
            _ => base_dir.to_path_buf(),
        };
        ScanOptions {
            root_dir,
            number_log: resolve(base_dir, &self.number_log),
            layout: self.layout(),
            project_number: non_empty(&self.project_number),
            project_title: non_empty(&self.project_title),
            nr_pattern: self.nr_pattern.clone(),
            rev_pattern: self.rev_pattern.clone(),
            skip_dir_names: self.subdirs_to_skip.clone(),
        }
    }
}

/// Directory that relative config paths resolve against.
pub fn config_base_dir(config_path: &Path) -> Result<PathBuf> {
    let parent = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if parent.is_absolute() {
        return Ok(parent);
    }
    Ok(std::env::current_dir()?.join(parent))
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
