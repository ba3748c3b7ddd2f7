pub mod loader;

pub use loader::ConfigLoader;

use crate::core::batch::{BatchOptions, DEFAULT_EXTENSION};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "cwl-upgrader.toml";

/// Upgrader configuration loaded from cwl-upgrader.toml
///
/// The `[logging]` table of the same file is read by
/// [`crate::logging::LoggingConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpgraderConfig {
    #[serde(default)]
    pub upgrade: UpgradeConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Extension used to find documents when a directory is upgraded
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchConfig {
    /// Abort a directory run at the first failing document
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        UpgradeConfig {
            extension: default_extension(),
        }
    }
}

impl UpgraderConfig {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            extension: self.upgrade.extension.clone(),
            fail_fast: self.batch.fail_fast,
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}
