//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rectree/rectree.toml`
//! 3. Local config: `<project_dir>/.rectree.toml`
//! 4. Environment variables: `RECTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::TreeLimits;

/// Smallest label threshold that still leaves room for one character and the ellipsis.
pub const MIN_LABEL_LEN: usize = 4;

/// Unified configuration for rectree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Node labels longer than this are truncated when drawn (default: 40)
    pub label_max_len: usize,
    /// Deepest recursion tree accepted from the model (default: 64)
    pub max_tree_depth: usize,
    /// Largest recursion tree accepted from the model (default: 10000)
    pub max_tree_nodes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = TreeLimits::default();
        Self {
            label_max_len: 40,
            max_tree_depth: limits.max_depth,
            max_tree_nodes: limits.max_nodes,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → field not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub label_max_len: Option<usize>,
    pub max_tree_depth: Option<usize>,
    pub max_tree_nodes: Option<usize>,
}

/// Get the XDG config directory for rectree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rectree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rectree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".rectree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Decoding limits for recursion trees.
    pub fn tree_limits(&self) -> TreeLimits {
        TreeLimits {
            max_depth: self.max_tree_depth,
            max_nodes: self.max_tree_nodes,
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            label_max_len: overlay.label_max_len.unwrap_or(self.label_max_len),
            max_tree_depth: overlay.max_tree_depth.unwrap_or(self.max_tree_depth),
            max_tree_nodes: overlay.max_tree_nodes.unwrap_or(self.max_tree_nodes),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Load settings from an explicit global config file and project directory.
    ///
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Project-local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply RECTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RECTREE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_usize(&config, "label_max_len")? {
            settings.label_max_len = val;
        }
        if let Some(val) = env_usize(&config, "max_tree_depth")? {
            settings.max_tree_depth = val;
        }
        if let Some(val) = env_usize(&config, "max_tree_nodes")? {
            settings.max_tree_nodes = val;
        }

        Ok(settings)
    }

    /// Reject values the splitter and renderer cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.label_max_len < MIN_LABEL_LEN {
            return Err(ApplicationError::Config {
                message: format!(
                    "label_max_len must be at least {}, got {}",
                    MIN_LABEL_LEN, self.label_max_len
                ),
            });
        }
        if self.max_tree_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_tree_depth must be positive".to_string(),
            });
        }
        if self.max_tree_nodes == 0 {
            return Err(ApplicationError::Config {
                message: "max_tree_nodes must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rectree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rectree/rectree.toml
#   Local:  <project_dir>/.rectree.toml
#   Env:    RECTREE_* environment variables (e.g. RECTREE_LABEL_MAX_LEN=60)

# Node labels longer than this are shown as the first (n - 3) characters + "..."
# label_max_len = 40

# Recursion trees deeper than this are rejected as invalid
# max_tree_depth = 64

# Recursion trees with more nodes than this are rejected as invalid
# max_tree_nodes = 10000
"#
        .to_string()
    }
}

/// Read an unsigned value, treating "not set" as `None` and bad values as errors.
fn env_usize(config: &Config, key: &str) -> Result<Option<usize>, ApplicationError> {
    match config.get::<usize>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("RECTREE_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.label_max_len, 40);
        assert_eq!(settings.tree_limits(), TreeLimits::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            label_max_len: Some(20),
            max_tree_depth: None,
            max_tree_nodes: Some(50),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.label_max_len, 20);
        assert_eq!(merged.max_tree_depth, base.max_tree_depth);
        assert_eq!(merged.max_tree_nodes, 50);
    }

    #[test]
    fn given_tiny_label_threshold_when_validating_then_rejects() {
        let settings = Settings {
            label_max_len: 3,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_zero_limits_when_validating_then_rejects() {
        let depth = Settings {
            max_tree_depth: 0,
            ..Settings::default()
        };
        let nodes = Settings {
            max_tree_nodes: 0,
            ..Settings::default()
        };
        assert!(depth.validate().is_err());
        assert!(nodes.validate().is_err());
    }

    #[test]
    fn given_settings_when_serialized_then_toml_round_trips() {
        let settings = Settings::default();
        let toml_str = settings.to_toml().unwrap();
        assert!(toml_str.contains("label_max_len = 40"));
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.label_max_len.is_none());
    }
}
