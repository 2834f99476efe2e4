//! Top-level querygen configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CodegenConfig, ScanConfig};
use crate::errors::ConfigError;

/// Name of the project configuration file looked up in the root directory.
pub const PROJECT_CONFIG_FILE: &str = "querygen.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`QUERYGEN_*`)
/// 3. Project config (`querygen.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuerygenConfig {
    pub scan: ScanConfig,
    pub codegen: CodegenConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_threads: Option<usize>,
    pub include_tests: Option<bool>,
    pub runtime_import_path: Option<String>,
}

impl QuerygenConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            ::tracing::debug!(path = %project_config_path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuerygenConfig) -> Result<(), ConfigError> {
        if config.scan.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref path) = config.codegen.runtime_import_path {
            if path.is_empty() || path.contains(|c: char| c.is_whitespace() || c == '"') {
                return Err(ConfigError::ValidationFailed {
                    field: "codegen.runtime_import_path".to_string(),
                    message: "must be a non-empty Go import path".to_string(),
                });
            }
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut QuerygenConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuerygenConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut QuerygenConfig, other: &QuerygenConfig) {
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.respect_gitignore.is_some() {
            base.scan.respect_gitignore = other.scan.respect_gitignore;
        }
        if other.scan.include_tests.is_some() {
            base.scan.include_tests = other.scan.include_tests;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }

        if other.codegen.runtime_import_path.is_some() {
            base.codegen.runtime_import_path = other.codegen.runtime_import_path.clone();
        }
    }

    /// Pattern: `QUERYGEN_<SECTION>_<KEY>`.
    fn apply_env_overrides(config: &mut QuerygenConfig) {
        if let Ok(val) = std::env::var("QUERYGEN_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("QUERYGEN_SCAN_INCLUDE_TESTS") {
            if let Ok(v) = val.parse::<bool>() {
                config.scan.include_tests = Some(v);
            }
        }
        if let Ok(val) = std::env::var("QUERYGEN_CODEGEN_RUNTIME_IMPORT_PATH") {
            config.codegen.runtime_import_path = Some(val);
        }
    }

    fn apply_cli_overrides(config: &mut QuerygenConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.include_tests {
            config.scan.include_tests = Some(v);
        }
        if let Some(ref v) = cli.runtime_import_path {
            config.codegen.runtime_import_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
