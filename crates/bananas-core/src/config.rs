//! Configuration file support.
//!
//! The config is a TOML file with a `[store]` section (where the local
//! store lives and which key holds grades) and an `[export]` section (where
//! artifacts go and how reports are titled). Every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::export::DEFAULT_LEARNER_NAME;
use crate::storage::GRADES_KEY;

/// Application name shown in printable reports.
pub const APP_NAME: &str = "BananasEdu";

const DATA_DIR_NAME: &str = "bananasedu";

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub grades_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("local_storage.json"),
            grades_key: GRADES_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub app_name: String,
    pub default_learner: String,
    pub open_documents: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            app_name: APP_NAME.to_string(),
            default_learner: DEFAULT_LEARNER_NAME.to_string(),
            open_documents: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub export: ExportConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(DATA_DIR_NAME).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
