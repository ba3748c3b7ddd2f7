#![allow(clippy::result_large_err)]

use super::{UpgraderConfig, CONFIG_FILE_NAME};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the config file to read: the explicit one, or
    /// `cwl-upgrader.toml` inside `dir`.
    pub fn resolve_path(explicit: Option<&Path>, dir: &Path) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.join(CONFIG_FILE_NAME))
    }

    /// Defaults, then the file at `path` when it exists, then environment
    /// overrides. The result is validated.
    pub fn load(path: &Path) -> Result<UpgraderConfig, AppError> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<UpgraderConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: UpgraderConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut UpgraderConfig) {
        if let Ok(extension) = env::var("CWL_UPGRADER_EXTENSION") {
            config.upgrade.extension = extension;
        }

        if let Ok(fail_fast_str) = env::var("CWL_UPGRADER_FAIL_FAST") {
            if let Ok(fail_fast) = fail_fast_str.parse::<bool>() {
                config.batch.fail_fast = fail_fast;
            }
        }
    }

    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "CWL_UPGRADER_EXTENSION - Override the document extension used in directory mode (default: cwl)",
            "CWL_UPGRADER_FAIL_FAST - Stop a directory run at the first failure (true/false, default: false)",
            "CWL_UPGRADER_LOG_LEVEL - Override the default log level (default: info)",
        ]
    }

    pub fn validate_config(config: &UpgraderConfig) -> Result<(), AppError> {
        let extension = config.upgrade.extension.trim();
        if extension.is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigurationError,
                "upgrade.extension cannot be empty".to_string(),
            ));
        }

        if extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(AppError::new(
                ErrorCategory::ConfigurationError,
                format!(
                    "upgrade.extension must be a bare extension such as `cwl`, got `{}`",
                    extension
                ),
            ));
        }

        Ok(())
    }
}
