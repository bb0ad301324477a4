//! Layered CLI settings.
//!
//! Precedence, highest first: command-line flags, `NUTRICARE_*` environment
//! variables, the optional YAML file, built-in defaults.

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use nutricare_core::service::nutrition_service::DEFAULT_BATCH_SIZE;
use serde::Deserialize;

/// Base name of the optional settings file (`nutricare.yaml`).
pub const DEFAULT_SETTINGS_FILE: &str = "nutricare";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub db_path: String,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<String>,
    pub batch_size: usize,
}

impl Settings {
    /// Loads file and environment layers. A missing file is not an error.
    pub fn load(file: &str) -> anyhow::Result<Self> {
        Config::builder()
            .set_default("db_path", "nutricare.db")?
            .set_default("log_level", nutricare_core::default_log_level())?
            .set_default("batch_size", DEFAULT_BATCH_SIZE as u64)?
            .add_source(
                File::with_name(file)
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("NUTRICARE").try_parsing(true))
            .build()
            .with_context(|| format!("failed to load settings from `{file}` and NUTRICARE_*"))?
            .try_deserialize()
            .context("failed to deserialize settings")
    }

    /// Applies command-line overrides on top of the loaded layers.
    pub fn with_overrides(mut self, db_path: Option<String>, batch_size: Option<usize>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        self
    }
}
