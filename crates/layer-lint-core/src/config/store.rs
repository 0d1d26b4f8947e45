use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::normalize::{normalize_config, normalize_prefix};
use super::RuleConfig;
use crate::error::{LayerLintError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Table holding the rule configuration. Bump on incompatible changes.
pub const CONFIG_KEY: &str = "rules_v1";

const CONFIG_HEADER: &str = r#"# layer-lint configuration file
# Location: ~/.layer-lint/config.toml
#
# frameLayerName       Label for frames named "Frame" or "Frame N"
# colorPaths           Prefixes of the regular / inverse / brand text colors
# renameRules          { newName, path } - the last segment of `path` is the
#                      category; text styled "<category>/..." is renamed to
#                      `newName` and must use one of that category's paths
# alwaysAllowedColors  { name, color } - never reported as a mismatch
#
# Legacy rules written as { category, pathType } are still accepted.

"#;

impl RuleConfig {
    /// Load config from base directory.
    ///
    /// A missing file, unparseable TOML or a missing `rules_v1` table yields
    /// the defaults. Only I/O failures are errors.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let table: toml::Table = match toml::from_str(&content) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "config is not valid TOML, using defaults"
                );
                return Ok(Self::default());
            }
        };

        let raw = table
            .get(CONFIG_KEY)
            .and_then(|v| serde_json::to_value(v).ok());
        if raw.is_none() {
            warn!(
                path = %path.display(),
                key = CONFIG_KEY,
                "config key missing, using defaults"
            );
        }

        Ok(normalize_config(raw.as_ref()))
    }

    /// Save the normalized config to base directory.
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;
        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Write the defaults with a comment header if no config exists yet.
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            let body = Self::default().to_toml()?;
            fs::write(&path, format!("{CONFIG_HEADER}{body}"))?;
        }

        Ok(path)
    }

    fn to_toml(&self) -> Result<String> {
        let mut table = toml::Table::new();
        table.insert(CONFIG_KEY.to_string(), toml::Value::try_from(self.normalized())?);
        Ok(toml::to_string_pretty(&table)?)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "frameLayerName" => Some(self.frame_layer_name.clone()),
            "colorPaths.regular" => Some(self.color_paths.regular.clone()),
            "colorPaths.inverse" => Some(self.color_paths.inverse.clone()),
            "colorPaths.brand" => Some(self.color_paths.brand.clone()),
            "renameRules" => Some(
                self.rename_rules
                    .iter()
                    .map(|r| format!("{} <- {}", r.new_name, r.path))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            "alwaysAllowedColors" => Some(
                self.always_allowed_colors
                    .iter()
                    .map(|c| format!("{} ({})", c.color, c.name))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }

    /// Set a scalar config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || LayerLintError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "frameLayerName" => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(invalid());
                }
                self.frame_layer_name = name.to_string();
            }
            "colorPaths.regular" => {
                self.color_paths.regular = normalize_prefix(value).ok_or_else(invalid)?;
            }
            "colorPaths.inverse" => {
                self.color_paths.inverse = normalize_prefix(value).ok_or_else(invalid)?;
            }
            "colorPaths.brand" => {
                self.color_paths.brand = normalize_prefix(value).ok_or_else(invalid)?;
            }
            _ => {
                return Err(LayerLintError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("frameLayerName".to_string(), self.frame_layer_name.clone()),
            (
                "colorPaths.regular".to_string(),
                self.color_paths.regular.clone(),
            ),
            (
                "colorPaths.inverse".to_string(),
                self.color_paths.inverse.clone(),
            ),
            ("colorPaths.brand".to_string(), self.color_paths.brand.clone()),
            (
                "renameRules".to_string(),
                format!("{} rules", self.rename_rules.len()),
            ),
            (
                "alwaysAllowedColors".to_string(),
                format!("{} colors", self.always_allowed_colors.len()),
            ),
        ]
    }
}
